use std::env;
use std::str::FromStr;
use std::time::Duration;

pub fn get_database_url() -> Result<String, env::VarError> {
    env::var("DATABASE_URL")
}

pub fn get_server_address() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

pub fn get_jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "pagatron-dev-secret".to_string())
}

pub fn get_jwt_expiry_hours() -> i64 {
    parse_or("JWT_EXPIRY_HOURS", 1)
}

pub fn get_db_max_connections() -> u32 {
    parse_or("DB_MAX_CONNECTIONS", 10)
}

pub fn get_db_min_connections() -> u32 {
    parse_or("DB_MIN_CONNECTIONS", 1)
}

pub fn get_db_acquire_timeout() -> Duration {
    Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 30))
}

pub fn get_allowed_origins() -> Vec<String> {
    env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://localhost:3000".to_string())
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

pub fn run_migrations() -> bool {
    parse_or("RUN_MIGRATIONS", true)
}

fn parse_or<T: FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
