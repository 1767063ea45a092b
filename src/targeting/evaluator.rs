// src/targeting/evaluator.rs

use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::error::PredicateFailure;
use crate::model::RequestContext;
use crate::targeting::group::TargetingGroup;
use crate::targeting::pool::{PredicateOutcome, PredicatePool};
use crate::targeting::predicate::PredicateResult;

/// **定向评估器**
/// 判断一个定向组在给定请求上下文下是否满足：所有谓词都为 TRUE。
#[derive(Debug, Clone)]
pub struct TargetingEvaluator {
    pool: Arc<PredicatePool>,
}

impl TargetingEvaluator {
    pub fn new(pool: Arc<PredicatePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PredicatePool> {
        &self.pool
    }

    /// 评估定向组，只返回 `True` 或 `False`
    ///
    /// 组内所有谓词一次性并发提交到工作池，再按完成顺序归约。
    /// 第一个非 TRUE 的结果（FALSE、INDETERMINATE 或失败）即决定 FALSE，
    /// 其余任务被中止。空谓词列表为 TRUE。
    pub async fn evaluate(&self, context: &Arc<RequestContext>, group: &TargetingGroup) -> PredicateResult {
        if group.predicates.is_empty() {
            return PredicateResult::True;
        }

        let mut tasks: JoinSet<PredicateOutcome> = JoinSet::new();
        for predicate in &group.predicates {
            self.pool.dispatch(&mut tasks, Arc::clone(predicate), Arc::clone(context));
        }

        while let Some(joined) = tasks.join_next().await {
            match flatten(joined) {
                Ok(PredicateResult::True) => continue,
                Ok(result) => {
                    debug!(
                        targeting_group_id = %group.targeting_group_id,
                        content_id = %group.content_id,
                        ?result,
                        "targeting group not satisfied"
                    );
                    tasks.abort_all();
                    return PredicateResult::False;
                }
                Err(failure) => {
                    warn!(
                        targeting_group_id = %group.targeting_group_id,
                        content_id = %group.content_id,
                        customer_id = %context.customer_id,
                        marketplace_id = %context.marketplace_id,
                        error = %failure,
                        "predicate evaluation failed, treating as FALSE"
                    );
                    tasks.abort_all();
                    return PredicateResult::False;
                }
            }
        }

        PredicateResult::True
    }
}

fn flatten(joined: Result<PredicateOutcome, JoinError>) -> PredicateOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => Err(PredicateFailure::Panicked),
        Err(_) => Err(PredicateFailure::Cancelled),
    }
}
