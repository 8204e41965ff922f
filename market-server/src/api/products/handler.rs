//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{ApiResponse, PaginationParams, Role};
use validator::Validate;

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::models::{ProduceCategory, Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::db::repository::product::ProductFilter;
use crate::utils::validation::{
    validate_non_negative_price, validate_non_negative_quantity, validation_error,
};
use crate::utils::{AppError, AppResult};

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProduceCategory>,
    pub available: Option<bool>,
    pub farmer: Option<String>,
}

/// GET /api/products - 商品列表（公开）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let filter = ProductFilter {
        category: query.category,
        available: query.available,
        farmer: query.farmer,
    };
    let products = repo.find_all(&filter, &page).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// GET /api/products/:id - 获取单个商品（公开）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::product_not_found(&id))?;
    Ok(Json(ApiResponse::success(product)))
}

/// POST /api/products - 创建商品（仅 farmer）
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    if principal.role != Role::Farmer {
        return Err(AppError::forbidden("Only farmers can create products"));
    }
    payload.validate().map_err(validation_error)?;
    validate_non_negative_price(payload.price, "price")?;
    validate_non_negative_quantity(payload.quantity, "quantity")?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(&principal.id, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// PUT /api/products/:id - 更新商品（所有者或管理员）
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    payload.validate().map_err(validation_error)?;
    if let Some(price) = payload.price {
        validate_non_negative_price(price, "price")?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::product_not_found(&id))?;
    if existing.farmer != principal.id && !principal.is_admin() {
        return Err(AppError::forbidden("Not authorized to update this product"));
    }

    let product = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// DELETE /api/products/:id - 删除商品（所有者或管理员）
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = ProductRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::product_not_found(&id))?;
    if existing.farmer != principal.id && !principal.is_admin() {
        return Err(AppError::forbidden("Not authorized to delete this product"));
    }

    repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// Signed stock delta (restock or correction)
#[derive(Debug, Deserialize)]
pub struct StockAdjust {
    pub delta: i64,
}

/// POST /api/products/:id/stock - 库存调整（所有者或管理员）
///
/// 数量变更只经由库存账本；目录更新接口不携带 quantity 字段。
pub async fn adjust_stock(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(payload): Json<StockAdjust>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::product_not_found(&id))?;
    if existing.farmer != principal.id && !principal.is_admin() {
        return Err(AppError::forbidden("Not authorized to adjust this product"));
    }

    let product = state.ledger.adjust(&id, payload.delta).await?;
    Ok(Json(ApiResponse::success(product)))
}
