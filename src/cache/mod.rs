// 缓存模块
// 缓存键、存储实现和目录查询缓存

pub mod keys;
pub mod operations;
pub mod store;

// 重新导出常用类型
pub use keys::ListingKind;
pub use operations::DirectoryCache;
pub use store::{CacheError, CacheStore, MemoryCacheStore, RedisCacheStore};
