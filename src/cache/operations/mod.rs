/// 缓存操作

// 目录查询缓存
pub mod directory;

pub use directory::DirectoryCache;
