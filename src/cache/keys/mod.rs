/// 缓存键模块
/// 提供各种缓存键生成函数

// 目录缓存键模块
pub mod directory_keys;

pub use directory_keys::{ListingKind, directory_key};
