// src/targeting/group.rs

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::targeting::predicate::TargetingPredicate;
use crate::targeting::predicates::PredicateSpec;

/// 定向组：归属于一条广告内容，持有有序的谓词列表
#[derive(Debug, Clone)]
pub struct TargetingGroup {
    pub targeting_group_id: String,
    pub content_id: String,
    pub predicates: Vec<Arc<dyn TargetingPredicate>>,
}

impl TargetingGroup {
    pub fn new(targeting_group_id: &str, content_id: &str, predicates: Vec<Arc<dyn TargetingPredicate>>) -> Self {
        Self {
            targeting_group_id: targeting_group_id.to_string(),
            content_id: content_id.to_string(),
            predicates,
        }
    }
}

/// 目录中定向组的可序列化形式
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TargetingGroupRecord {
    pub targeting_group_id: String,
    pub content_id: String,
    #[serde(default)]
    pub predicates: Vec<PredicateSpec>,
}

impl TargetingGroupRecord {
    pub fn to_group(&self) -> TargetingGroup {
        TargetingGroup {
            targeting_group_id: self.targeting_group_id.clone(),
            content_id: self.content_id.clone(),
            predicates: self.predicates.iter().map(PredicateSpec::build).collect(),
        }
    }
}
