// src/selection/engine.rs

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::{ContentSource, TargetingGroupSource};
use crate::error::Result;
use crate::logging::SelectionLog;
use crate::model::{AdvertisementContent, GeneratedAdvertisement, RequestContext};
use crate::selection::random::{RandomSource, ThreadRandom};
use crate::targeting::TargetingEvaluator;

/// **广告选择引擎**
/// 拉取 marketplace 下的候选内容，按定向组过滤出合格内容，再均匀随机选出一条。
pub struct SelectionEngine {
    content_source: Arc<dyn ContentSource>,
    targeting_group_source: Arc<dyn TargetingGroupSource>,
    evaluator: TargetingEvaluator,
    random: Arc<dyn RandomSource>,
}

impl SelectionEngine {
    pub fn new(
        content_source: Arc<dyn ContentSource>,
        targeting_group_source: Arc<dyn TargetingGroupSource>,
        evaluator: TargetingEvaluator,
    ) -> Self {
        Self {
            content_source,
            targeting_group_source,
            evaluator,
            random: Arc::new(ThreadRandom),
        }
    }

    /// 替换随机源（测试中注入固定种子）
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// 为客户选择一条广告
    ///
    /// marketplace 为空时直接返回 `Empty`，不访问内容源。
    /// 上游查询失败以错误返回；谓词失败只影响对应定向组。
    pub async fn select_advertisement(
        &self,
        customer_id: &str,
        marketplace_id: Option<&str>,
    ) -> Result<GeneratedAdvertisement> {
        // 仅用 trim 判断是否为空，查询时原样使用调用方传入的值
        let marketplace_id = match marketplace_id {
            Some(m) if !m.trim().is_empty() => m,
            _ => {
                warn!(%customer_id, "MarketplaceId cannot be null or empty. Returning empty ad.");
                let mut log = SelectionLog::new(customer_id, "");
                log.set_status("invalid_marketplace");
                info!(target: "ad_selection", "{}", log.to_json());
                return Ok(GeneratedAdvertisement::Empty);
            }
        };

        let mut log = SelectionLog::new(customer_id, marketplace_id);
        let result = self.select_eligible(customer_id, marketplace_id, &mut log).await;
        if result.is_err() {
            log.set_status("lookup_failed");
        }
        info!(target: "ad_selection", "{}", log.to_json());
        result
    }

    async fn select_eligible(
        &self,
        customer_id: &str,
        marketplace_id: &str,
        log: &mut SelectionLog,
    ) -> Result<GeneratedAdvertisement> {
        let contents = self.content_source.get_contents(marketplace_id).await?;
        log.candidate_count = contents.len();
        if contents.is_empty() {
            debug!(%marketplace_id, "no advertisement content for marketplace");
            return Ok(GeneratedAdvertisement::Empty);
        }

        let context = Arc::new(RequestContext::new(customer_id, marketplace_id));

        // 各候选并发检查；try_join_all 保持输入顺序
        let checks = contents.iter().map(|content| self.is_eligible(&context, content));
        let verdicts = try_join_all(checks).await?;

        let eligible: Vec<&AdvertisementContent> = contents
            .iter()
            .zip(verdicts)
            .filter_map(|(content, eligible)| eligible.then_some(content))
            .collect();
        log.eligible_count = eligible.len();

        if eligible.is_empty() {
            return Ok(GeneratedAdvertisement::Empty);
        }

        // 对下标取模，随机源越界时不会 panic
        let index = self.random.next_index(eligible.len()) % eligible.len();
        let chosen = eligible[index].clone();
        log.set_selected(chosen.id());
        Ok(GeneratedAdvertisement::Advertisement(chosen))
    }

    /// 候选合格：至少一个定向组满足；content_id 为 null 则不合格
    async fn is_eligible(&self, context: &Arc<RequestContext>, content: &AdvertisementContent) -> Result<bool> {
        let Some(content_id) = content.id() else {
            return Ok(false);
        };

        let groups = self.targeting_group_source.get_targeting_groups(content_id).await?;
        for group in &groups {
            if self.evaluator.evaluate(context, group).await.is_true() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
