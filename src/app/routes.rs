// ==========================================
// 网店订单出货系统 - HTTP 路由层
// ==========================================
// 职责: 定义 HTTP 端点，解析请求并调用 API 层
// 约定: 错误统一映射为 {"error": ...} JSON 响应
// ==========================================

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::api::{ApiError, ShopOrderFilter};
use crate::app::state::AppState;
use crate::domain::{
    ChecklistItem, ChecklistUpdate, NewChecklistItem, OrderLineRecord, OrderSummary, PickingItem,
    ShopOrder, ShopOrderMetadata, ShopPickingItem,
};

// ==========================================
// 错误映射
// ==========================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) | ApiError::ImportError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ShopApiNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ShopApiError(_) => StatusCode::BAD_GATEWAY,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) | ApiError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("请求处理失败: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ==========================================
// 请求体
// ==========================================

/// 整批保存清单的请求体
#[derive(Debug, Deserialize)]
struct ChecklistPayload {
    items: Vec<NewChecklistItem>,
}

/// 批量查询远端订单的请求体
#[derive(Debug, Deserialize)]
struct BatchOrdersRequest {
    order_ids: Vec<i64>,
}

// ==========================================
// 路由表
// ==========================================

/// 构建完整路由表
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders/upload", post(upload_orders))
        .route("/orders/uploaded", get(list_uploaded).delete(clear_uploaded))
        .route("/orders/uploaded/summary", get(list_summaries))
        .route("/orders/uploaded/last", get(last_upload_time))
        .route("/orders/picking", get(list_picking))
        .route("/api/checklist", get(list_checklist).post(save_checklist))
        .route("/api/checklist/pending", get(pending_checklist))
        .route(
            "/api/checklist/{id}",
            patch(update_checklist_item).delete(delete_checklist_item),
        )
        .route("/api/orders", get(list_shop_orders))
        .route("/api/orders/batch", post(fetch_shop_orders_batch))
        .route(
            "/api/orders/{id}",
            get(get_shop_order).put(update_shop_order_metadata),
        )
        .route("/api/picking-list", get(shop_picking_list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==========================================
// 基础端点
// ==========================================

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

// ==========================================
// 上传订单端点
// ==========================================

/// POST /orders/upload
///
/// multipart 表单需携带名为 `file` 的文件栏位，
/// 成功时返回 {"rows": 导入行数}
async fn upload_orders(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("读取 multipart 内容失败: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidInput(format!("读取上传文件失败: {}", e)))?;
            upload = Some((file_name, data.to_vec()));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::InvalidInput("缺少 file 文件栏位".to_string()))?;
    let rows = state.upload_api.upload_workbook(&file_name, &bytes).await?;
    Ok(Json(json!({ "rows": rows })))
}

/// GET /orders/uploaded
async fn list_uploaded(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderLineRecord>>, ApiError> {
    Ok(Json(state.upload_api.list_records().await?))
}

/// GET /orders/uploaded/summary
async fn list_summaries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    Ok(Json(state.upload_api.list_summaries().await?))
}

/// GET /orders/uploaded/last
async fn last_upload_time(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ts = state.upload_api.last_upload_time().await?;
    Ok(Json(json!({ "last_uploaded_at": ts })))
}

/// GET /orders/picking
async fn list_picking(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PickingItem>>, ApiError> {
    Ok(Json(state.upload_api.list_picking().await?))
}

/// DELETE /orders/uploaded
async fn clear_uploaded(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.upload_api.clear_all().await?;
    Ok(Json(json!({ "status": "cleared" })))
}

// ==========================================
// 出货清单端点
// ==========================================

/// GET /api/checklist
async fn list_checklist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChecklistItem>>, ApiError> {
    Ok(Json(state.checklist_api.list()?))
}

/// GET /api/checklist/pending
async fn pending_checklist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChecklistItem>>, ApiError> {
    Ok(Json(state.checklist_api.pending()?))
}

/// POST /api/checklist
///
/// 请求体 {"items": [{"text": ..., "checked": ...}, ...]}，整批逐条入库
async fn save_checklist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChecklistPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.checklist_api.save_batch(&payload.items)?;
    Ok(Json(json!({ "status": "saved" })))
}

/// PATCH /api/checklist/{id}
async fn update_checklist_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<ChecklistUpdate>,
) -> Result<Json<ChecklistItem>, ApiError> {
    Ok(Json(state.checklist_api.update(id, &update)?))
}

/// DELETE /api/checklist/{id}
async fn delete_checklist_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.checklist_api.delete(id)?;
    Ok(Json(json!({ "status": "deleted" })))
}

// ==========================================
// 远端商店订单端点
// ==========================================

/// GET /api/orders
///
/// 查询参数：
/// - tags（可重复）: 任一标签命中即保留
/// - has_remark=true: 仅保留有备注的订单
/// - has_customer_note=true: 仅保留有客户留言的订单
async fn list_shop_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ShopOrder>>, ApiError> {
    let mut filter = ShopOrderFilter::default();
    for (key, value) in params {
        match key.as_str() {
            "tags" => filter.tags.push(value),
            "has_remark" => filter.has_remark = value == "true",
            "has_customer_note" => filter.has_customer_note = value == "true",
            _ => {}
        }
    }
    Ok(Json(
        state.shop_order_api.list_processing_orders(&filter).await?,
    ))
}

/// GET /api/orders/{id}
async fn get_shop_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ShopOrder>, ApiError> {
    Ok(Json(state.shop_order_api.get_order(id).await?))
}

/// PUT /api/orders/{id}
///
/// 保存订单的本地备注；路径中的 id 覆盖请求体内的 order_id
async fn update_shop_order_metadata(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(metadata): Json<ShopOrderMetadata>,
) -> Result<Json<ShopOrderMetadata>, ApiError> {
    Ok(Json(state.shop_order_api.update_metadata(id, metadata)?))
}

/// POST /api/orders/batch
///
/// 请求体 {"order_ids": [...]}，一次最多 100 笔
async fn fetch_shop_orders_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchOrdersRequest>,
) -> Result<Json<Vec<ShopOrder>>, ApiError> {
    Ok(Json(state.shop_order_api.fetch_batch(&req.order_ids).await?))
}

/// GET /api/picking-list
async fn shop_picking_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShopPickingItem>>, ApiError> {
    Ok(Json(state.shop_order_api.picking_list().await?))
}
