// src/catalog/http_client.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::catalog::{ContentSource, TargetingGroupSource};
use crate::error::{Result, SelectionError};
use crate::model::AdvertisementContent;
use crate::targeting::{TargetingGroup, TargetingGroupRecord};

/// 远端键值查询服务的客户端
/// - `GET {base}/contents/{marketplace_id}`
/// - `GET {base}/targeting-groups/{content_id}`
///
/// 查询键作为单独的路径段写入并做百分号编码。
/// 404 视为空结果；连接失败、超时、其它非 2xx 状态码和解析失败都作为错误返回。
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// 拼接 `{base}/{segments...}`，每个段都会被百分号编码
    fn url_for(&self, segments: &[&str]) -> std::result::Result<Url, String> {
        let mut url = Url::parse(&self.base_url).map_err(|e| format!("invalid catalog url {}: {}", self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| format!("catalog url {} cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned + Default>(&self, segments: &[&str]) -> std::result::Result<T, String> {
        let url = self.url_for(segments)?;
        let resp = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", url, e))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(T::default()),
            status if status.is_success() => resp
                .json::<T>()
                .await
                .map_err(|e| format!("invalid response from {}: {}", url, e)),
            status => Err(format!("{} returned {}", url, status)),
        }
    }
}

#[async_trait]
impl ContentSource for HttpCatalogClient {
    async fn get_contents(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>> {
        self.fetch(&["contents", marketplace_id])
            .await
            .map_err(|reason| SelectionError::ContentLookup {
                marketplace_id: marketplace_id.to_string(),
                reason,
            })
    }
}

#[async_trait]
impl TargetingGroupSource for HttpCatalogClient {
    async fn get_targeting_groups(&self, content_id: &str) -> Result<Vec<TargetingGroup>> {
        let records: Vec<TargetingGroupRecord> = self
            .fetch(&["targeting-groups", content_id])
            .await
            .map_err(|reason| SelectionError::TargetingGroupLookup {
                content_id: content_id.to_string(),
                reason,
            })?;
        Ok(records.iter().map(TargetingGroupRecord::to_group).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_encoded_as_single_path_segments() {
        let client = HttpCatalogClient::new("http://localhost:9001/catalog/", Duration::from_millis(100));
        let url = client.url_for(&["contents", "US?x=1#frag"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9001/catalog/contents/US%3Fx=1%23frag");
        assert_eq!(url.query(), None);

        let url = client.url_for(&["targeting-groups", "a/b"]).unwrap();
        assert_eq!(url.path(), "/catalog/targeting-groups/a%2Fb");
    }
}
