use serde::Deserialize;

/// Main configuration structure for Quote-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scrape: ScrapeSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeSettings {
    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Lower bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "delay-min-ms", default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "delay-max-ms", default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    /// Safety cap on pages per category when the page limit is 0
    #[serde(rename = "max-pages-per-category", default = "default_max_pages")]
    pub max_pages_per_category: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Directory the per-category CSV files are written to
    #[serde(rename = "export-dir", default = "default_export_dir")]
    pub export_dir: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_delay_min_ms() -> u64 {
    1000
}

fn default_delay_max_ms() -> u64 {
    2500
}

fn default_max_pages() -> u32 {
    100
}

fn default_export_dir() -> String {
    "Export".to_string()
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout_secs(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            max_pages_per_category: default_max_pages(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}
