// src/model/content.rs

use serde::{Deserialize, Serialize};

/// 广告候选内容，由外部内容源持有；
/// `content_id` 缺失时该候选永远不具备投放资格。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementContent {
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub renderable_content: String,
    #[serde(default)]
    pub marketplace_id: Option<String>,
}

impl AdvertisementContent {
    pub fn new(content_id: Option<&str>, renderable_content: &str) -> Self {
        Self {
            content_id: content_id.map(str::to_string),
            renderable_content: renderable_content.to_string(),
            marketplace_id: None,
        }
    }

    /// 只有 null 的 content_id 视为缺失，空字符串照常作为键使用
    pub fn id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }
}
