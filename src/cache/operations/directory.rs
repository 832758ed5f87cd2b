use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::cache::keys::directory_keys::{ListingKind, directory_key};
use crate::cache::store::{CacheError, CacheStore};
use crate::error::SankhyaError;
use crate::sankhya::{DirectoryQueries, DirectoryRecord};

#[derive(Error, Debug)]
enum LookupError {
    #[error(transparent)]
    Query(#[from] SankhyaError),

    #[error("manager code is required to list sales reps")]
    MissingManagerCode,
}

/// 目录缓存 (cache-aside)
///
/// 命中时不访问 Sankhya；未命中时查询并写入缓存。所有失败都被记录并吞掉，
/// 返回空列表，失败结果不写入缓存。
#[derive(Clone)]
pub struct DirectoryCache {
    store: Arc<dyn CacheStore>,
    queries: Arc<dyn DirectoryQueries>,
    ttl: Duration,
}

impl DirectoryCache {
    pub fn new(
        store: Arc<dyn CacheStore>,
        queries: Arc<dyn DirectoryQueries>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            queries,
            ttl,
        }
    }

    pub async fn fetch(&self, kind: ListingKind, manager_code: Option<i64>) -> Vec<DirectoryRecord> {
        let key = directory_key(kind, manager_code);

        match self.cached(&key).await {
            Ok(Some(records)) => {
                tracing::debug!("Directory cache hit: {}", key);
                return records;
            }
            Ok(None) => tracing::debug!("Directory cache miss: {}", key),
            Err(e) => tracing::warn!("Directory cache read failed for {}: {}", key, e),
        }

        let records = match self.load(kind, manager_code).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Directory lookup {} failed: {}", key, e);
                return Vec::new();
            }
        };

        if let Err(e) = self.put(&key, &records).await {
            tracing::warn!("Directory cache write failed for {}: {}", key, e);
        } else {
            tracing::debug!("Cached {} directory records under {}", records.len(), key);
        }

        records
    }

    async fn cached(&self, key: &str) -> Result<Option<Vec<DirectoryRecord>>, CacheError> {
        match self.store.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, records: &[DirectoryRecord]) -> Result<(), CacheError> {
        let json = serde_json::to_string(records)?;
        self.store.set(key, json, self.ttl).await
    }

    async fn load(
        &self,
        kind: ListingKind,
        manager_code: Option<i64>,
    ) -> Result<Vec<DirectoryRecord>, LookupError> {
        match kind {
            ListingKind::Managers => Ok(self.queries.query_managers().await?),
            ListingKind::SalesReps => {
                let code = manager_code
                    .filter(|code| *code != 0)
                    .ok_or(LookupError::MissingManagerCode)?;
                Ok(self.queries.query_sales_reps(Some(code)).await?)
            }
            ListingKind::All => {
                let mut records = self.queries.query_managers().await?;
                records.extend(self.queries.query_sales_reps(None).await?);
                Ok(records)
            }
        }
    }
}
