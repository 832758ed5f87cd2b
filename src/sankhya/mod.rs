// Sankhya ERP 客户端
// 令牌管理、带令牌的请求、实体解码和经理/销售代表目录

pub mod decoder;
pub mod directory;
pub mod endpoints;
pub mod executor;
pub mod model;
pub mod payload;
pub mod session;

pub use directory::{DEFAULT_COMPANY, DirectoryQueries, DirectoryService, SettleDelays};
pub use endpoints::Endpoints;
pub use executor::RequestExecutor;
pub use model::{CreatedSeller, DirectoryRecord, NewSeller, Role};
pub use session::TokenManager;
