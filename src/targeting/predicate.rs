// src/targeting/predicate.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::model::RequestContext;

/// 谓词评估结果；只有 `True` 计入定向组满足
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredicateResult {
    True,
    False,
    Indeterminate,
}

impl PredicateResult {
    pub fn is_true(self) -> bool {
        self == PredicateResult::True
    }

    /// TRUE 与 FALSE 互换，INDETERMINATE 保持不变
    pub fn invert(self) -> Self {
        match self {
            PredicateResult::True => PredicateResult::False,
            PredicateResult::False => PredicateResult::True,
            PredicateResult::Indeterminate => PredicateResult::Indeterminate,
        }
    }
}

impl From<bool> for PredicateResult {
    fn from(value: bool) -> Self {
        if value {
            PredicateResult::True
        } else {
            PredicateResult::False
        }
    }
}

/// **定向谓词**：针对请求上下文的不透明布尔规则
#[async_trait]
pub trait TargetingPredicate: Send + Sync + Debug {
    async fn evaluate(&self, context: &RequestContext) -> PredicateResult;
}

/// 对内部谓词结果取反
#[derive(Debug)]
pub struct Inverse {
    inner: Arc<dyn TargetingPredicate>,
}

impl Inverse {
    pub fn new(inner: Arc<dyn TargetingPredicate>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TargetingPredicate for Inverse {
    async fn evaluate(&self, context: &RequestContext) -> PredicateResult {
        self.inner.evaluate(context).await.invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(PredicateResult);

    #[async_trait]
    impl TargetingPredicate for Fixed {
        async fn evaluate(&self, _context: &RequestContext) -> PredicateResult {
            self.0
        }
    }

    #[tokio::test]
    async fn inverse_swaps_true_and_false_only() {
        let ctx = RequestContext::new("c1", "US");
        for (input, expected) in [
            (PredicateResult::True, PredicateResult::False),
            (PredicateResult::False, PredicateResult::True),
            (PredicateResult::Indeterminate, PredicateResult::Indeterminate),
        ] {
            let predicate = Inverse::new(Arc::new(Fixed(input)));
            assert_eq!(predicate.evaluate(&ctx).await, expected);
        }
    }
}
