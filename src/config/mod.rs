use std::env;
use std::time::Duration;

/// 默认目录缓存过期时间 (30 分钟)
const DEFAULT_CACHE_TTL_SECS: u64 = 1800;
const DEFAULT_SETTLE_DELAY_MANAGER_MS: u64 = 500;
const DEFAULT_SETTLE_DELAY_SELLER_MS: u64 = 1000;

/// Sankhya 登录所需的服务凭据
#[derive(Clone, serde::Deserialize)]
pub struct ServiceCredentials {
    pub token: String,
    pub appkey: String,
    pub username: String,
    pub password: String,
}

// 不输出密码和令牌
impl std::fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("appkey", &self.appkey)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub credentials: ServiceCredentials,
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub cache_ttl_secs: u64,
    pub settle_delay_manager_ms: u64,
    pub settle_delay_seller_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            credentials: ServiceCredentials {
                token: env::var("SANKHYA_TOKEN")?,
                appkey: env::var("SANKHYA_APPKEY")?,
                username: env::var("SANKHYA_USERNAME")?,
                password: env::var("SANKHYA_PASSWORD")?,
            },
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parse_or("SERVER_PORT", 3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            cache_ttl_secs: parse_or("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECS),
            settle_delay_manager_ms: parse_or(
                "SETTLE_DELAY_MANAGER_MS",
                DEFAULT_SETTLE_DELAY_MANAGER_MS,
            ),
            settle_delay_seller_ms: parse_or("SETTLE_DELAY_SELLER_MS", DEFAULT_SETTLE_DELAY_SELLER_MS),
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn settle_delay_manager(&self) -> Duration {
        Duration::from_millis(self.settle_delay_manager_ms)
    }

    pub fn settle_delay_seller(&self) -> Duration {
        Duration::from_millis(self.settle_delay_seller_ms)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
