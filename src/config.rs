/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub profile_config: Option<String>,
    pub log_level: String,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Config {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    // Read variables, all of them optional
    let profile_config = std::env::var("PROFILE_CONFIG")
        .ok()
        .filter(|path| !path.trim().is_empty());
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    Config {
        profile_config,
        log_level,
    }
}
