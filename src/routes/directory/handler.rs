use axum::extract::{Json, Query, State};

use crate::{
    AppState,
    cache::ListingKind,
    error::AppError,
    sankhya::{CreatedSeller, DEFAULT_COMPANY, DirectoryRecord, NewSeller},
};

use super::model::{CreateManagerRequest, ListQuery};

/// 直接查询 Sankhya，查询失败时返回空列表
#[axum::debug_handler]
pub async fn list_directory(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DirectoryRecord>>, AppError> {
    match query.tipo.as_deref() {
        Some("gerentes") => Ok(Json(state.directory.list_managers().await)),
        Some("vendedores") => Ok(Json(
            state.directory.list_sales_reps(query.manager_code()).await,
        )),
        _ => Err(AppError::BadRequest("Tipo não especificado".to_string())),
    }
}

/// 走缓存的查询，未知类型按 "todos" 处理
#[axum::debug_handler]
pub async fn search_directory(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<DirectoryRecord>> {
    let kind = query
        .tipo
        .as_deref()
        .and_then(ListingKind::parse)
        .unwrap_or_default();

    Json(state.directory_cache.fetch(kind, query.manager_code()).await)
}

#[axum::debug_handler]
pub async fn create_seller(
    State(state): State<AppState>,
    Json(req): Json<NewSeller>,
) -> Result<Json<CreatedSeller>, AppError> {
    tracing::info!("Creating seller {} (manager {:?})", req.name, req.manager_code());

    let created = state.directory.create_sales_rep_or_manager(&req).await?;
    Ok(Json(created))
}

#[axum::debug_handler]
pub async fn create_manager(
    State(state): State<AppState>,
    Json(req): Json<CreateManagerRequest>,
) -> Result<Json<DirectoryRecord>, AppError> {
    tracing::info!("Creating manager {}", req.display_name);

    let manager = state
        .directory
        .create_manager(&req.display_name, req.company_code.unwrap_or(DEFAULT_COMPANY))
        .await?;
    Ok(Json(manager))
}
