use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://heimdall-server.servehttp.com:8443";
pub const DEFAULT_KEYRING_SERVICE: &str = "heimdall-doctor";
pub const DEFAULT_TOKEN_KEY: &str = "doctor_jwt";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Service root, without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub keyring_service: String,
    pub token_key: String,
    /// How many times the create half of a prescription replace is attempted.
    pub replace_create_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            replace_create_attempts: 2,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("HEIMDALL_API_URL").unwrap_or(defaults.base_url);

        let request_timeout = env::var("HEIMDALL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let keyring_service =
            env::var("HEIMDALL_KEYRING_SERVICE").unwrap_or(defaults.keyring_service);

        let token_key = env::var("HEIMDALL_TOKEN_KEY").unwrap_or(defaults.token_key);

        let replace_create_attempts = env::var("HEIMDALL_REPLACE_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.replace_create_attempts);

        Self {
            base_url,
            request_timeout,
            keyring_service,
            token_key,
            replace_create_attempts,
        }
        .normalized()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self.replace_create_attempts = self.replace_create_attempts.max(1);
        self
    }
}
