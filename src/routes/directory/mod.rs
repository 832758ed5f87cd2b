mod handler;
mod model;

pub use handler::{create_manager, create_seller, list_directory, search_directory};
pub use model::{CreateManagerRequest, ListQuery};
