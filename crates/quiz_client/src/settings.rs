use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8003";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. Quiz generation can take a while, so none by default.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
