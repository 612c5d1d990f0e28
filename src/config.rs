use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub static_dir: String,
    pub password_hash_cost: u32,
    pub secure_cookies: bool,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./db/todo.db".to_string());

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let password_hash_cost: u32 = env::var("PASSWORD_HASH_COST")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .map_err(|_| "Invalid PASSWORD_HASH_COST")?;
        if password_hash_cost == 0 {
            return Err("PASSWORD_HASH_COST must be at least 1".to_string());
        }

        let secure_cookies = parse_bool(
            &env::var("SECURE_COOKIES").unwrap_or_else(|_| "false".to_string()),
        )
        .ok_or("Invalid SECURE_COOKIES")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            static_dir,
            password_hash_cost,
            secure_cookies,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_server_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            database_path: "todo.db".to_string(),
            static_dir: "static".to_string(),
            password_hash_cost: 1,
            secure_cookies: false,
            environment: "test".to_string(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
