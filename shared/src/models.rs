use serde::{Deserialize, Serialize};

/// One directory contact record. `id` is absent until the directory has
/// created the record; a first-time visitor gets a placeholder with no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// List ids the contact currently belongs to.
    pub list_ids: Vec<String>,
}

impl Contact {
    /// Placeholder for an email the directory has never seen. Valid outcome,
    /// not an error: the form renders it as a blank sign-up.
    pub fn placeholder(email: &str) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            list_ids: vec![],
        }
    }

    pub fn is_subscribed_to(&self, list_id: &str) -> bool {
        self.list_ids.iter().any(|id| id == list_id)
    }
}

/// One mailing list as presented to the form: display name (visibility tag
/// stripped) plus the contact's subscription state for this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingList {
    pub id: String,
    pub name: String,
    pub is_subscribed: bool,
}

/// The single payload the form and the two handlers exchange on GET.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesView {
    pub contact_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub lists: Vec<MailingList>,
}

/// Submitted form state: the desired list set replaces prior membership, it
/// is never merged with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSubmission {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub list_ids: Vec<String>,
}

impl PreferencesSubmission {
    pub fn account(&self) -> AccountSelector {
        AccountSelector::parse(self.account.as_deref())
    }

    /// An empty contactId string from the form means "no contact yet".
    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Tenant selector. Each variant routes to its own directory API key; unknown
/// or absent values fall back to the default tenant rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountSelector {
    #[default]
    Visitors,
    Media,
    Industry,
}

impl AccountSelector {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("media") => AccountSelector::Media,
            Some("industry") => AccountSelector::Industry,
            _ => AccountSelector::Visitors,
        }
    }
}

/// Which reconciliation path a submission took, with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    Unsubscribed,
}

impl SaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::Created => "Subscription created",
            SaveOutcome::Updated => "Your preferences have been updated",
            SaveOutcome::Unsubscribed => "You are now unsubscribed from all mailing lists",
        }
    }
}

/// True when the raw list name carries a bracketed tag prefix, e.g.
/// `[SPECIAL] Rangers Program`. Tagged lists are hidden from the form unless
/// the contact is already subscribed to them.
pub fn has_visibility_tag(name: &str) -> bool {
    name.starts_with('[') && name.contains("] ")
}

/// Display name with the bracketed tag prefix stripped. Used for presentation
/// and for sort comparisons; the raw name is only consulted for visibility.
/// Strips through the last `"] "` so a stray bracket inside the tag does not
/// leave half of it behind.
pub fn display_name(name: &str) -> &str {
    if name.starts_with('[') {
        if let Some(end) = name.rfind("] ") {
            return &name[end + 2..];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_tag_detection() {
        assert!(has_visibility_tag("[SPECIAL] Rangers Program"));
        assert!(has_visibility_tag("[VIP] Backstage"));
        assert!(!has_visibility_tag("Rangers Program"));
        assert!(!has_visibility_tag("[unclosed tag"));
    }

    #[test]
    fn test_display_name_stripping() {
        assert_eq!(display_name("[SPECIAL] Rangers Program"), "Rangers Program");
        assert_eq!(display_name("General News"), "General News");
        assert_eq!(display_name("[unclosed tag"), "[unclosed tag");
        // A bracket inside the tag is stripped along with it
        assert_eq!(display_name("[A] B] C"), "C");
    }

    #[test]
    fn test_account_selector_defaults() {
        assert_eq!(AccountSelector::parse(None), AccountSelector::Visitors);
        assert_eq!(AccountSelector::parse(Some("media")), AccountSelector::Media);
        assert_eq!(AccountSelector::parse(Some("industry")), AccountSelector::Industry);
        assert_eq!(AccountSelector::parse(Some("visitors")), AccountSelector::Visitors);
        // Unrecognized selectors never error, they route to the default tenant
        assert_eq!(AccountSelector::parse(Some("partners")), AccountSelector::Visitors);
    }

    #[test]
    fn test_submission_parsing() {
        let json = r#"{
            "account": "media",
            "contactId": "C1",
            "email": "user@example.com",
            "firstName": "Jane",
            "listIds": ["L1", "L2"]
        }"#;

        let submission: PreferencesSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.account(), AccountSelector::Media);
        assert_eq!(submission.contact_id(), Some("C1"));
        assert_eq!(submission.email, "user@example.com");
        assert_eq!(submission.first_name.as_deref(), Some("Jane"));
        assert_eq!(submission.last_name, None);
        assert_eq!(submission.list_ids, vec!["L1", "L2"]);
    }

    #[test]
    fn test_empty_contact_id_treated_as_absent() {
        let json = r#"{ "email": "user@example.com", "contactId": "", "listIds": [] }"#;
        let submission: PreferencesSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.contact_id(), None);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = PreferencesView {
            contact_id: Some("C1".to_string()),
            email: "user@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            lists: vec![MailingList {
                id: "L1".to_string(),
                name: "General News".to_string(),
                is_subscribed: true,
            }],
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["contactId"], "C1");
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lists"][0]["isSubscribed"], true);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(SaveOutcome::Created.message(), "Subscription created");
        assert_eq!(SaveOutcome::Updated.message(), "Your preferences have been updated");
        assert_eq!(
            SaveOutcome::Unsubscribed.message(),
            "You are now unsubscribed from all mailing lists"
        );
    }
}
