//! 缓存存储抽象
//!
//! 值以 JSON 字符串存储，由调用方负责序列化。Redis 用于生产环境，
//! 未配置 `REDIS_URL` 时使用进程内的 moka 缓存。

mod memory_cache;
mod redis_cache;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory_cache::MemoryCacheStore;
pub use self::redis_cache::RedisCacheStore;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取未过期的值；不存在和已过期都返回 `None`
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 写入并设置过期时间，覆盖已有的值
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
