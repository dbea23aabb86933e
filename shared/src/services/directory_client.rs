use serde::{Deserialize, Serialize};

use crate::{AccountSelector, Contact, DirectoryCredentials, PreferencesError, PreferencesResult};

/// One mailing list as the directory reports it. The raw name may carry a
/// visibility tag prefix; stripping happens at the view layer.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<WireContact>,
}

#[derive(Debug, Deserialize)]
struct WireContact {
    id: String,
    email: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    list_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ContactDetail {
    #[serde(default)]
    list_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListsResponse {
    #[serde(default)]
    result: Vec<DirectoryList>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    contacts: [UpsertContact<'a>; 1],
    list_ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpsertContact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

/// Thin client for the directory's marketing API. Holds its API key as plain
/// per-instance state: a request for one tenant can never see another
/// tenant's credential.
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Client scoped to the credential of one tenant.
    pub fn for_account(credentials: &DirectoryCredentials, account: AccountSelector) -> Self {
        Self::new(credentials.base_url(), credentials.api_key(account))
    }

    /// Look up a contact by case-insensitive email match. An empty search
    /// result is `None`, not an error.
    pub async fn search_contact(&self, email: &str) -> PreferencesResult<Option<Contact>> {
        // Single quotes would terminate the query string literal
        let escaped = email.replace('\'', "''");
        let query = format!("lower(email) = lower('{}')", escaped);

        let response = self
            .http
            .post(format!("{}/v3/marketing/contacts/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let body: SearchResponse = self.ensure_success(response, "contact search").await?.json().await?;

        Ok(body.result.into_iter().next().map(|raw| Contact {
            id: Some(raw.id),
            email: raw.email,
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            list_ids: raw.list_ids,
        }))
    }

    /// Live list memberships for an existing contact.
    pub async fn contact_list_ids(&self, contact_id: &str) -> PreferencesResult<Vec<String>> {
        tracing::info!("Getting current lists for contact {}", contact_id);

        let response = self
            .http
            .get(format!("{}/v3/marketing/contacts/{}", self.base_url, contact_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let detail: ContactDetail = self.ensure_success(response, "contact fetch").await?.json().await?;

        Ok(detail.list_ids)
    }

    /// Every list defined for this tenant, raw names included.
    pub async fn all_lists(&self) -> PreferencesResult<Vec<DirectoryList>> {
        let response = self
            .http
            .get(format!("{}/v3/marketing/lists", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let body: ListsResponse = self.ensure_success(response, "list enumeration").await?.json().await?;

        Ok(body.result)
    }

    /// Create-or-update by email, replacing the contact's list assignment
    /// with `list_ids`.
    pub async fn upsert_contact(
        &self,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        list_ids: &[String],
    ) -> PreferencesResult<()> {
        let body = UpsertRequest {
            contacts: [UpsertContact { email, first_name, last_name }],
            list_ids,
        };

        tracing::info!("Updating contact {} with {} lists", email, list_ids.len());

        let response = self
            .http
            .put(format!("{}/v3/marketing/contacts", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        self.ensure_success(response, "contact upsert").await?;

        Ok(())
    }

    pub async fn remove_contact_from_list(
        &self,
        contact_id: &str,
        list_id: &str,
    ) -> PreferencesResult<()> {
        tracing::info!("Removing contact {} from list {}", contact_id, list_id);

        let response = self
            .http
            .delete(format!(
                "{}/v3/marketing/lists/{}/contacts",
                self.base_url, list_id
            ))
            .bearer_auth(&self.api_key)
            .query(&[("contact_ids", contact_id)])
            .send()
            .await?;
        self.ensure_success(response, "list removal").await?;

        Ok(())
    }

    pub async fn delete_contact(&self, contact_id: &str) -> PreferencesResult<()> {
        tracing::info!("Deleting contact {}", contact_id);

        let response = self
            .http
            .delete(format!("{}/v3/marketing/contacts", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[("ids", contact_id)])
            .send()
            .await?;
        self.ensure_success(response, "contact delete").await?;

        Ok(())
    }

    async fn ensure_success(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> PreferencesResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| String::new());
        tracing::error!(
            "Directory call failed - Operation: {}, Status: {}, Body: {}",
            operation,
            status,
            body
        );

        Err(PreferencesError::DirectoryUnavailable(format!(
            "{} returned {}",
            operation, status
        )))
    }
}
