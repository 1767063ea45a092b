// src/logging/selection_log.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// **单次广告选择的聚合日志**
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectionLog {
    pub timestamp: String,              // 记录时间
    pub log_type: String,               // 日志类型，固定为 "ad_selection"
    pub selection_id: Uuid,             // 本次调用的唯一标识
    pub customer_id: String,
    pub marketplace_id: String,
    pub candidate_count: usize,         // 候选内容数量
    pub eligible_count: usize,          // 通过定向的内容数量
    pub selected_content_id: Option<String>,
    pub status: String,                 // "selected" / "empty" / "invalid_marketplace" / "lookup_failed"
}

impl SelectionLog {
    /// **创建选择日志**，默认状态为 empty，后续可更新
    pub fn new(customer_id: &str, marketplace_id: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "ad_selection".to_string(),
            selection_id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            marketplace_id: marketplace_id.to_string(),
            candidate_count: 0,
            eligible_count: 0,
            selected_content_id: None,
            status: "empty".to_string(),
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// **记录选中的内容**
    pub fn set_selected(&mut self, content_id: Option<&str>) {
        self.status = "selected".to_string();
        self.selected_content_id = content_id.map(str::to_string);
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_log_serializes_counts() {
        let mut log = SelectionLog::new("c1", "US");
        log.candidate_count = 3;
        log.eligible_count = 2;
        log.set_selected(Some("A"));

        let value: serde_json::Value = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(value["status"], "selected");
        assert_eq!(value["selected_content_id"], "A");
        assert_eq!(value["eligible_count"], 2);
        assert_eq!(value["log_type"], "ad_selection");
    }
}
