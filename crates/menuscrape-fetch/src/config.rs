use serde::Deserialize;

fn default_timeout() -> u64 {
    20
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_body_bytes() -> usize {
    8 * 1024 * 1024
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    concat!("menuscrape/", env!("CARGO_PKG_VERSION")).to_owned()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

fn default_max_retry_delay() -> u64 {
    30
}

/// HTTP fetch settings: timeouts, body cap, redirect limit, and retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Longest single wait between retries in seconds, `Retry-After` included.
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_body_bytes: default_max_body_bytes(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            max_retry_delay: default_max_retry_delay(),
        }
    }
}
