use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub log_level: String,
    pub queries_path: Option<PathBuf>,
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    pub search_delay_ms: u64,
    pub verify_batch_size: usize,
    pub verify_batch_delay_ms: u64,
}

impl AppConfig {
    /// The Google Custom Search credential pair.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming whichever of
    /// `GOOGLE_API_KEY` / `GOOGLE_CSE_ID` is not set.
    pub fn google_credentials(&self) -> Result<(String, String), ConfigError> {
        let api_key = self
            .google_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;
        let cse_id = self
            .google_cse_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_CSE_ID".to_string()))?;
        Ok((api_key, cse_id))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_cse_id",
                &self.google_cse_id.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("queries_path", &self.queries_path)
            .field("user_agent", &self.user_agent)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("verify_batch_size", &self.verify_batch_size)
            .field("verify_batch_delay_ms", &self.verify_batch_delay_ms)
            .finish()
    }
}
