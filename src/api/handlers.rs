// src/api/handlers.rs

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::api::AppState;
use crate::model::GeneratedAdvertisement;

#[derive(Deserialize, Debug, Default)]
pub struct AdvertisementQuery {
    #[serde(default)]
    pub customer_id: String,
    pub marketplace_id: Option<String>,
}

/// **处理广告选择请求**
/// 成功时返回 200 与选择结果（可能为空广告）；上游目录不可用时返回 502。
pub async fn handle_select_advertisement(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdvertisementQuery>,
) -> Result<Json<GeneratedAdvertisement>, (StatusCode, Json<Value>)> {
    match state
        .engine
        .select_advertisement(&query.customer_id, query.marketplace_id.as_deref())
        .await
    {
        Ok(ad) => Ok(Json(ad)),
        Err(e) => {
            error!(
                customer_id = %query.customer_id,
                marketplace_id = ?query.marketplace_id,
                error = %e,
                "advertisement selection failed"
            );
            Err((StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))))
        }
    }
}
