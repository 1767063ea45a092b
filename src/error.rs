// src/error.rs

use std::time::Duration;
use thiserror::Error;

/// 选择广告过程中无法在本地恢复的错误（上游查询失败等）
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("content lookup failed for marketplace {marketplace_id}: {reason}")]
    ContentLookup { marketplace_id: String, reason: String },

    #[error("targeting group lookup failed for content {content_id}: {reason}")]
    TargetingGroupLookup { content_id: String, reason: String },

    #[error("catalog load failed: {0}")]
    CatalogLoad(String),
}

/// 单个谓词评估失败的原因，统一按 FALSE 处理（fail-closed）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateFailure {
    #[error("predicate timed out after {0:?}")]
    Timeout(Duration),

    #[error("predicate panicked")]
    Panicked,

    #[error("predicate task cancelled")]
    Cancelled,

    #[error("predicate pool is shut down")]
    PoolClosed,
}

pub type Result<T> = std::result::Result<T, SelectionError>;
