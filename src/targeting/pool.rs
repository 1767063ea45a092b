// src/targeting/pool.rs

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinSet};
use tokio::time::{timeout, Duration};

use crate::error::PredicateFailure;
use crate::model::RequestContext;
use crate::targeting::predicate::{PredicateResult, TargetingPredicate};

pub type PredicateOutcome = Result<PredicateResult, PredicateFailure>;

pub const DEFAULT_MAX_CONCURRENCY: usize = 64;
pub const DEFAULT_PREDICATE_TIMEOUT_MS: u64 = 250;

/// **谓词工作池**
/// 用信号量限制同时运行的谓词数量；每个谓词任务先取得许可再执行，
/// 并受单谓词超时约束。`shutdown` 之后所有新评估都直接失败。
#[derive(Debug)]
pub struct PredicatePool {
    permits: Arc<Semaphore>,
    max_concurrency: usize,
    predicate_timeout: Duration,
}

impl PredicatePool {
    pub fn new(max_concurrency: usize, predicate_timeout: Duration) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
            predicate_timeout,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn predicate_timeout(&self) -> Duration {
        self.predicate_timeout
    }

    /// 将一个谓词评估提交到 `set` 中
    pub fn dispatch(
        &self,
        set: &mut JoinSet<PredicateOutcome>,
        predicate: Arc<dyn TargetingPredicate>,
        context: Arc<RequestContext>,
    ) -> AbortHandle {
        let permits = Arc::clone(&self.permits);
        let limit = self.predicate_timeout;
        set.spawn(async move {
            // 等待许可期间被 abort 的任务不会执行谓词
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| PredicateFailure::PoolClosed)?;
            timeout(limit, predicate.evaluate(&context))
                .await
                .map_err(|_| PredicateFailure::Timeout(limit))
        })
    }

    /// 关闭工作池：等待中的与后续提交的评估全部以 `PoolClosed` 失败
    pub fn shutdown(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Default for PredicatePool {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_CONCURRENCY,
            Duration::from_millis(DEFAULT_PREDICATE_TIMEOUT_MS),
        )
    }
}
