// src/main.rs

use axum::serve;
use clap::Parser;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use ad_selector::api::{self, AppState};
use ad_selector::catalog::{ContentSource, FileCatalogAdapter, HttpCatalogClient, TargetingGroupSource};
use ad_selector::config::{CliArgs, ConfigManager};
use ad_selector::logging::init_tracing;
use ad_selector::mock_catalog;
use ad_selector::selection::SelectionEngine;
use ad_selector::targeting::{PredicatePool, TargetingEvaluator};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = ConfigManager::from_args(&args);

    // 初始化全局 tracing 日志
    let _guard = match init_tracing(&args.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Unable to set global tracing subscriber: {}", e);
            process::exit(1);
        }
    };
    info!("Ad selector starting on port {}", args.port);

    // 启动 Mock 目录服务（可选），直接对外提供本地目录文件
    if let Some(port) = args.mock_catalog_port {
        match FileCatalogAdapter::new(&config.catalog_file).load() {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                tokio::spawn(async move {
                    if let Err(e) = mock_catalog::start_mock_catalog_server(port, catalog).await {
                        error!("Mock catalog server stopped: {}", e);
                    }
                });
            }
            Err(e) => error!("Mock catalog not started: {}", e),
        }
    }

    // 目录来源：远端服务优先，否则读取本地文件
    let (content_source, targeting_group_source): (Arc<dyn ContentSource>, Arc<dyn TargetingGroupSource>) =
        match &config.catalog_url {
            Some(url) => {
                info!("Using remote catalog at {}", url);
                let client = Arc::new(HttpCatalogClient::new(url, config.lookup_timeout));
                (client.clone() as Arc<dyn ContentSource>, client as Arc<dyn TargetingGroupSource>)
            }
            None => match FileCatalogAdapter::new(&config.catalog_file).load() {
                Ok(catalog) => {
                    info!("Loaded catalog from {}", config.catalog_file);
                    let catalog = Arc::new(catalog);
                    (catalog.clone() as Arc<dyn ContentSource>, catalog as Arc<dyn TargetingGroupSource>)
                }
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            },
        };

    let pool = Arc::new(PredicatePool::new(config.max_concurrent_predicates, config.predicate_timeout));
    info!(
        max_concurrency = pool.max_concurrency(),
        predicate_timeout_ms = pool.predicate_timeout().as_millis() as u64,
        "Predicate pool ready"
    );
    let engine = SelectionEngine::new(content_source, targeting_group_source, TargetingEvaluator::new(pool.clone()));
    let state = Arc::new(AppState { engine: Arc::new(engine) });

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Unable to bind {}: {}", addr, e);
            process::exit(1);
        }
    };
    info!("Ad selector running at http://{}", addr);

    let shutdown = api::wait_for_shutdown(signal::ctrl_c());

    if let Err(e) = serve(listener, api::router(state)).with_graceful_shutdown(shutdown).await {
        error!("Server error: {}", e);
    }

    // 释放谓词工作池
    pool.shutdown();
    info!("Ad selector shut down.");
}
