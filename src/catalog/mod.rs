// src/catalog/mod.rs

use async_trait::async_trait;

use crate::error::Result;
use crate::model::AdvertisementContent;
use crate::targeting::TargetingGroup;

pub mod adapters;
pub mod http_client;

pub use adapters::{CatalogData, FileCatalogAdapter, InMemoryCatalog};
pub use http_client::HttpCatalogClient;

/// 按 marketplace 查询广告候选内容（只读）
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get_contents(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>>;
}

/// 按 content_id 查询定向组（只读）
#[async_trait]
pub trait TargetingGroupSource: Send + Sync {
    async fn get_targeting_groups(&self, content_id: &str) -> Result<Vec<TargetingGroup>>;
}
