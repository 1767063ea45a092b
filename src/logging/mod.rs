// src/logging/mod.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub mod selection_log;

pub use selection_log::SelectionLog;

/// 初始化全局 tracing 日志：
/// JSON 格式按小时滚动写入 `log_dir/selector_log.json`，同时输出到标准输出。
/// 返回的 guard 必须在进程存活期间持有，否则缓冲日志会丢失。
pub fn init_tracing(log_dir: &str) -> Result<WorkerGuard, tracing::subscriber::SetGlobalDefaultError> {
    let log_file = rolling::hourly(log_dir, "selector_log.json");
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().json().with_writer(non_blocking))
        .with(fmt::layer().compact());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}
