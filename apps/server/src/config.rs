use std::{net::SocketAddr, time::Duration};

use crate::auth::{decode_secret_key, AuthConfig};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("BL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid BL_LISTEN_ADDR");
        let db_path =
            std::env::var("BL_DB_PATH").unwrap_or_else(|_| "./db/barberledger.db".into());
        let cors_allow = std::env::var("BL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("BL_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        // No secret means the server runs open; every principal gets access
        // to every unit. Only for local development and tests.
        let auth = std::env::var("BL_JWT_SECRET").ok().map(|raw| {
            let jwt_secret = decode_secret_key(&raw).expect("Invalid BL_JWT_SECRET");
            AuthConfig { jwt_secret }
        });
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth,
        }
    }
}
