use crate::{AccountSelector, PreferencesError, PreferencesResult};

pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Directory API keys, one per tenant. Loaded once per invocation from the
/// Lambda environment variables set by the deployment stack, then handed to
/// the client per request so concurrent requests for different tenants never
/// share mutable client state.
#[derive(Debug, Clone)]
pub struct DirectoryCredentials {
    visitors: String,
    media: String,
    industry: String,
    base_url: String,
}

impl DirectoryCredentials {
    /// Load all three tenant keys from the environment. A missing key is a
    /// deployment fault and fails the whole request.
    pub fn from_env() -> PreferencesResult<Self> {
        Ok(Self {
            visitors: require_env("SENDGRID_VISITORS_API_KEY")?,
            media: require_env("SENDGRID_MEDIA_API_KEY")?,
            industry: require_env("SENDGRID_INDUSTRY_API_KEY")?,
            base_url: std::env::var("DIRECTORY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Total mapping from tenant to key; the selector enum already absorbed
    /// any unrecognized input, so there is no fall-through here.
    pub fn api_key(&self, account: AccountSelector) -> &str {
        match account {
            AccountSelector::Visitors => &self.visitors,
            AccountSelector::Media => &self.media,
            AccountSelector::Industry => &self.industry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn require_env(name: &str) -> PreferencesResult<String> {
    std::env::var(name)
        .map_err(|_| PreferencesError::ConfigurationError(format!("{} not set", name)))
}
