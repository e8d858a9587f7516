use std::time::Duration;

pub const DEFAULT_URL: &str = "wss://ws.7k2v9x1r0z8t4m3n5p7w.com";
pub const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub url: String,
    pub receive_timeout: Duration,
    /// Covers TCP, TLS and the upgrade. `None` waits as long as the OS does.
    pub connect_timeout: Option<Duration>,
    pub close_timeout: Duration,
    pub headers: Vec<(String, String)>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            receive_timeout: DEFAULT_RECEIVE_TIMEOUT,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
            headers: Vec::new(),
        }
    }
}

impl ProbeConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Some endpoints reject upgrades that don't look like they came from a browser page.
    pub fn browser_like(self, origin: &str) -> Self {
        self.with_header("Origin", origin)
            .with_header("User-Agent", BROWSER_USER_AGENT)
    }
}
