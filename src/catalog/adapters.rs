// src/catalog/adapters.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

use crate::catalog::{ContentSource, TargetingGroupSource};
use crate::error::{Result, SelectionError};
use crate::model::AdvertisementContent;
use crate::targeting::{TargetingGroup, TargetingGroupRecord};

/// 目录文件结构：内容按 marketplace 分组，定向组按 content_id 分组
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CatalogData {
    #[serde(default)]
    pub contents: HashMap<String, Vec<AdvertisementContent>>,
    #[serde(default)]
    pub targeting_groups: HashMap<String, Vec<TargetingGroupRecord>>,
}

/// 内存目录，同时充当内容源与定向组源
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    data: CatalogData,
}

impl InMemoryCatalog {
    pub fn new(data: CatalogData) -> Self {
        Self { data }
    }

    pub fn add_content(&mut self, marketplace_id: &str, content: AdvertisementContent) {
        self.data.contents.entry(marketplace_id.to_string()).or_default().push(content);
    }

    pub fn add_targeting_group(&mut self, record: TargetingGroupRecord) {
        self.data
            .targeting_groups
            .entry(record.content_id.clone())
            .or_default()
            .push(record);
    }

    pub fn contents(&self, marketplace_id: &str) -> Vec<AdvertisementContent> {
        self.data.contents.get(marketplace_id).cloned().unwrap_or_default()
    }

    pub fn targeting_group_records(&self, content_id: &str) -> Vec<TargetingGroupRecord> {
        self.data.targeting_groups.get(content_id).cloned().unwrap_or_default()
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }
}

#[async_trait]
impl ContentSource for InMemoryCatalog {
    async fn get_contents(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>> {
        Ok(self.contents(marketplace_id))
    }
}

#[async_trait]
impl TargetingGroupSource for InMemoryCatalog {
    async fn get_targeting_groups(&self, content_id: &str) -> Result<Vec<TargetingGroup>> {
        Ok(self
            .targeting_group_records(content_id)
            .iter()
            .map(TargetingGroupRecord::to_group)
            .collect())
    }
}

/// 从 JSON 文件加载目录
pub struct FileCatalogAdapter {
    pub catalog_file: String,
}

impl FileCatalogAdapter {
    pub fn new(catalog_file: &str) -> Self {
        Self {
            catalog_file: catalog_file.to_string(),
        }
    }

    pub fn load(&self) -> Result<InMemoryCatalog> {
        let content = fs::read_to_string(&self.catalog_file)
            .map_err(|e| SelectionError::CatalogLoad(format!("{}: {}", self.catalog_file, e)))?;
        let data: CatalogData = serde_json::from_str(&content)
            .map_err(|e| SelectionError::CatalogLoad(format!("{}: {}", self.catalog_file, e)))?;
        Ok(InMemoryCatalog::new(data))
    }
}
