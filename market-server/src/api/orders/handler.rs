//! Order API Handlers
//!
//! Thin mappings from HTTP to the order service; every rule lives in
//! `crate::orders`.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::ApiResponse;

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::utils::AppResult;

/// POST /api/orders - 创建订单（仅 customer）
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.create_order(&principal, payload).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// GET /api/orders - 当前主体可见的订单列表
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.orders.list_orders(&principal).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /api/orders/:id - 获取单个订单（买家/卖家/管理员）
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.get_order(&principal, &id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Status update request
///
/// The status arrives as a string and is parsed by the service so an
/// unknown value maps to the stable invalid-status error instead of a
/// generic body rejection.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/orders/:id/status - 更新订单状态（卖家或管理员）
pub async fn update_status(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .orders
        .set_status(&principal, &id, &payload.status)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Payment status update request
#[derive(Debug, Deserialize)]
pub struct PaymentStatusUpdate {
    pub payment_status: String,
}

/// PUT /api/orders/:id/payment - 更新支付状态（仅管理员）
pub async fn update_payment_status(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(payload): Json<PaymentStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .orders
        .set_payment_status(&principal, &id, &payload.payment_status)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// PUT /api/orders/:id/cancel - 取消订单（买家或管理员，仅 pending）
pub async fn cancel(
    State(state): State<ServerState>,
    principal: Principal,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.orders.cancel(&principal, &id).await?;
    Ok(Json(ApiResponse::success(order)))
}
