// src/targeting/predicates.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::model::RequestContext;
use crate::targeting::predicate::{Inverse, PredicateResult, TargetingPredicate};

/// 已识别客户：customer_id 非空
#[derive(Debug, Default)]
pub struct RecognizedPredicate;

#[async_trait]
impl TargetingPredicate for RecognizedPredicate {
    async fn evaluate(&self, context: &RequestContext) -> PredicateResult {
        context.is_recognized().into()
    }
}

/// 请求的 marketplace 在允许列表中
#[derive(Debug)]
pub struct MarketplacePredicate {
    marketplace_ids: HashSet<String>,
}

impl MarketplacePredicate {
    pub fn new<I: IntoIterator<Item = String>>(marketplace_ids: I) -> Self {
        Self { marketplace_ids: marketplace_ids.into_iter().collect() }
    }
}

#[async_trait]
impl TargetingPredicate for MarketplacePredicate {
    async fn evaluate(&self, context: &RequestContext) -> PredicateResult {
        self.marketplace_ids.contains(&context.marketplace_id).into()
    }
}

/// 客户白名单；无法识别客户时结果不确定
#[derive(Debug)]
pub struct CustomerAllowListPredicate {
    customer_ids: HashSet<String>,
}

impl CustomerAllowListPredicate {
    pub fn new<I: IntoIterator<Item = String>>(customer_ids: I) -> Self {
        Self { customer_ids: customer_ids.into_iter().collect() }
    }
}

#[async_trait]
impl TargetingPredicate for CustomerAllowListPredicate {
    async fn evaluate(&self, context: &RequestContext) -> PredicateResult {
        if !context.is_recognized() {
            return PredicateResult::Indeterminate;
        }
        self.customer_ids.contains(&context.customer_id).into()
    }
}

/// **目录文件中的谓词描述**
/// 例如 `{ "type": "marketplace", "marketplace_ids": ["US"], "inverse": true }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PredicateSpec {
    #[serde(flatten)]
    pub kind: PredicateKind,
    #[serde(default)]
    pub inverse: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateKind {
    Recognized,
    Marketplace { marketplace_ids: Vec<String> },
    CustomerAllowList { customer_ids: Vec<String> },
}

impl PredicateSpec {
    pub fn build(&self) -> Arc<dyn TargetingPredicate> {
        let predicate: Arc<dyn TargetingPredicate> = match &self.kind {
            PredicateKind::Recognized => Arc::new(RecognizedPredicate),
            PredicateKind::Marketplace { marketplace_ids } => {
                Arc::new(MarketplacePredicate::new(marketplace_ids.iter().cloned()))
            }
            PredicateKind::CustomerAllowList { customer_ids } => {
                Arc::new(CustomerAllowListPredicate::new(customer_ids.iter().cloned()))
            }
        };
        if self.inverse {
            Arc::new(Inverse::new(predicate))
        } else {
            predicate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recognized_requires_customer_id() {
        let predicate = RecognizedPredicate;
        assert_eq!(predicate.evaluate(&RequestContext::new("c1", "US")).await, PredicateResult::True);
        assert_eq!(predicate.evaluate(&RequestContext::new("", "US")).await, PredicateResult::False);
    }

    #[tokio::test]
    async fn allow_list_is_indeterminate_for_unknown_customer() {
        let predicate = CustomerAllowListPredicate::new(vec!["c1".to_string()]);
        assert_eq!(predicate.evaluate(&RequestContext::new("c1", "US")).await, PredicateResult::True);
        assert_eq!(predicate.evaluate(&RequestContext::new("c2", "US")).await, PredicateResult::False);
        assert_eq!(predicate.evaluate(&RequestContext::new("", "US")).await, PredicateResult::Indeterminate);
    }

    #[tokio::test]
    async fn spec_builds_inverted_marketplace_predicate() {
        let spec: PredicateSpec = serde_json::from_str(
            r#"{ "type": "marketplace", "marketplace_ids": ["US", "CA"], "inverse": true }"#,
        )
        .unwrap();
        let predicate = spec.build();
        assert_eq!(predicate.evaluate(&RequestContext::new("c1", "US")).await, PredicateResult::False);
        assert_eq!(predicate.evaluate(&RequestContext::new("c1", "DE")).await, PredicateResult::True);
    }

    #[test]
    fn inverse_defaults_to_false() {
        let spec: PredicateSpec = serde_json::from_str(r#"{ "type": "recognized" }"#).unwrap();
        assert_eq!(spec.kind, PredicateKind::Recognized);
        assert!(!spec.inverse);
    }
}
