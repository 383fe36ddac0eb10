// src/config.rs
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            // DATABASE_URL が無ければ個別の DB_* 変数から組み立てる
            Err(env::VarError::NotPresent) => Self::database_url_from_parts()?,
            Err(e) => return Err(e),
        };
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Config {
            database_url,
            server_addr,
        })
    }

    fn database_url_from_parts() -> Result<String, env::VarError> {
        let host = env::var("DB_HOST")?;
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user = env::var("DB_USER")?;
        let password = env::var("DB_PASSWORD")?;
        let name = env::var("DB_NAME")?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }
}
