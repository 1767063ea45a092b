// src/model/context.rs

use serde::{Deserialize, Serialize};

/// 单次选择请求的上下文：(customer_id, marketplace_id)
/// 在一次 select 调用中以 `Arc` 共享给所有谓词，评估期间不可变。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub customer_id: String,
    pub marketplace_id: String,
}

impl RequestContext {
    pub fn new(customer_id: &str, marketplace_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            marketplace_id: marketplace_id.to_string(),
        }
    }

    /// 客户是否可识别（customer_id 非空）
    pub fn is_recognized(&self) -> bool {
        !self.customer_id.trim().is_empty()
    }
}
