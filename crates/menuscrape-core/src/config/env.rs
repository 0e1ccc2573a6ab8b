use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MENUSCRAPE_TARGET_DOMAIN") {
            self.target_domain = v;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_TIMEOUT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.fetch.timeout = secs;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_CONNECT_TIMEOUT")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.fetch.connect_timeout = secs;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_MAX_BODY_BYTES")
            && let Ok(bytes) = v.parse::<usize>()
        {
            self.fetch.max_body_bytes = bytes;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_MAX_RETRIES")
            && let Ok(retries) = v.parse::<u32>()
        {
            self.fetch.max_retries = retries;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_MAX_RETRY_DELAY")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.fetch.max_retry_delay = secs;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_USER_AGENT") {
            self.fetch.user_agent = v;
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_OUTPUT_DIR") {
            self.output.dir = v.into();
        }
        if let Ok(v) = std::env::var("MENUSCRAPE_SAVE_FORMAT") {
            match v.parse() {
                Ok(format) => self.output.format = format,
                Err(e) => tracing::warn!("ignoring MENUSCRAPE_SAVE_FORMAT: {e}"),
            }
        }
    }
}
