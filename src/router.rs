use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, middleware::log_errors, routes};

// 经理/销售代表相关的路由
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/vendedores", get(routes::directory::list_directory))
        .route("/vendedores/busca", get(routes::directory::search_directory))
        .route("/vendedores/criar", post(routes::directory::create_seller))
        .route("/vendedores/gerentes", post(routes::directory::create_manager))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let base = state.config.api_base_uri.trim_end_matches('/').to_string();

    // axum 不允许在根路径 nest
    let router = if base.is_empty() {
        Router::new().merge(directory_routes())
    } else {
        Router::new().nest(&base, directory_routes())
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
