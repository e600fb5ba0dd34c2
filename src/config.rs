pub struct Config {
    pub port: u16,
    pub frappe_url: String,
    pub frappe_api_key: String,
    pub frappe_api_secret: String,
    pub frappe_timeout_secs: u64,
    pub default_currency: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            frappe_url: std::env::var("FRAPPE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            frappe_api_key: std::env::var("FRAPPE_API_KEY").unwrap_or_default(),
            frappe_api_secret: std::env::var("FRAPPE_API_SECRET").unwrap_or_default(),
            frappe_timeout_secs: std::env::var("FRAPPE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            default_currency: std::env::var("DEFAULT_CURRENCY")
                .ok()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "INR".to_string()),
            log_format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }
}
