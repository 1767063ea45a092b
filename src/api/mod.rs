// src/api/mod.rs

use axum::routing::get;
use axum::Router;
use std::future::{pending, Future};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

use crate::selection::SelectionEngine;

pub mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SelectionEngine>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/advertisement", get(handlers::handle_select_advertisement))
        .with_state(state)
}

/// 等待关闭信号；监听信号失败时记录错误并一直挂起，服务不会因此立即退出
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down gracefully..."),
        Err(e) => {
            error!("Unable to listen for shutdown signal: {}", e);
            pending::<()>().await;
        }
    }
}
