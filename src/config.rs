use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    pub market_api_key: String,
    pub market_base_url: String,
    pub check_interval_secs: u64,

    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from: String,

    pub parser_tables_file: Option<String>,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:trading_alerts.db?mode=rwc".to_string());

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let market_api_key = env::var("MARKET_API_KEY").unwrap_or_default();

    let market_base_url = env::var("MARKET_BASE_URL")
        .unwrap_or_else(|_| "https://finnhub.io/api/v1".to_string());

    let check_interval_secs = env::var("CHECK_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60);

    let smtp_host = env::var("SMTP_HOST").unwrap_or_default();

    let smtp_port = env::var("SMTP_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(587);

    let smtp_username = env::var("SMTP_USERNAME").unwrap_or_default();
    let smtp_password = env::var("SMTP_PASSWORD").unwrap_or_default();

    let email_from = env::var("EMAIL_FROM").unwrap_or_else(|_| smtp_username.clone());

    let parser_tables_file = env::var("PARSER_TABLES_FILE").ok();

    Settings {
        database_url,
        host,
        port,
        market_api_key,
        market_base_url,
        check_interval_secs,
        smtp_host,
        smtp_port,
        smtp_username,
        smtp_password,
        email_from,
        parser_tables_file,
    }
}
