// src/config/config_manager.rs

use clap::Parser;
use tokio::time::Duration;

use crate::targeting::pool::{DEFAULT_MAX_CONCURRENCY, DEFAULT_PREDICATE_TIMEOUT_MS};

#[derive(Parser, Debug, Clone)]
#[command(author = "whiteCcinn", version = "1.0", about = "A targeting-based advertisement selection server")]
pub struct CliArgs {
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "logs")]
    pub log_dir: String,
    /// 本地目录文件（未指定 --catalog-url 时使用）
    #[arg(long, default_value = "static/catalog.json")]
    pub catalog_file: String,
    /// 远端目录服务地址，例如 http://localhost:9001
    #[arg(long)]
    pub catalog_url: Option<String>,
    #[arg(long, default_value_t = DEFAULT_PREDICATE_TIMEOUT_MS)]
    pub predicate_timeout_ms: u64,
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrent_predicates: usize,
    #[arg(long, default_value_t = 500)]
    pub lookup_timeout_ms: u64,
    /// 以 HTTP 方式对外提供本地目录文件（模拟远端目录服务）
    #[arg(long)]
    pub mock_catalog_port: Option<u16>,
}

/// 运行期配置
#[derive(Clone, Debug)]
pub struct ConfigManager {
    pub catalog_file: String,
    pub catalog_url: Option<String>,
    pub predicate_timeout: Duration,
    pub max_concurrent_predicates: usize,
    pub lookup_timeout: Duration,
}

impl ConfigManager {
    pub fn from_args(args: &CliArgs) -> Self {
        ConfigManager {
            catalog_file: args.catalog_file.clone(),
            catalog_url: args.catalog_url.clone().filter(|url| !url.trim().is_empty()),
            predicate_timeout: Duration::from_millis(args.predicate_timeout_ms),
            max_concurrent_predicates: args.max_concurrent_predicates.max(1),
            lookup_timeout: Duration::from_millis(args.lookup_timeout_ms),
        }
    }
}
