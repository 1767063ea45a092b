// src/mock_catalog.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{serve, Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::catalog::InMemoryCatalog;
use crate::model::AdvertisementContent;
use crate::targeting::TargetingGroupRecord;

/// 模拟远端目录服务：返回内容列表
async fn handle_contents(
    State(catalog): State<Arc<InMemoryCatalog>>,
    Path(marketplace_id): Path<String>,
) -> Result<Json<Vec<AdvertisementContent>>, StatusCode> {
    info!(%marketplace_id, "Mock catalog received content lookup");
    match catalog.data().contents.get(&marketplace_id) {
        Some(contents) => Ok(Json(contents.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// 模拟远端目录服务：返回定向组
async fn handle_targeting_groups(
    State(catalog): State<Arc<InMemoryCatalog>>,
    Path(content_id): Path<String>,
) -> Result<Json<Vec<TargetingGroupRecord>>, StatusCode> {
    info!(%content_id, "Mock catalog received targeting group lookup");
    match catalog.data().targeting_groups.get(&content_id) {
        Some(records) => Ok(Json(records.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub fn router(catalog: Arc<InMemoryCatalog>) -> Router {
    Router::new()
        .route("/contents/{marketplace_id}", get(handle_contents))
        .route("/targeting-groups/{content_id}", get(handle_targeting_groups))
        .with_state(catalog)
}

/// 在已绑定的监听器上运行模拟目录服务
pub async fn serve_mock_catalog(listener: TcpListener, catalog: Arc<InMemoryCatalog>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Mock catalog running at http://{}", addr);
    }
    serve(listener, router(catalog)).await
}

/// 启动模拟目录服务，监听指定端口
pub async fn start_mock_catalog_server(port: u16, catalog: Arc<InMemoryCatalog>) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    serve_mock_catalog(listener, catalog).await
}
