// src/model/advertisement.rs

use serde::{Serialize, Serializer};

use crate::model::content::AdvertisementContent;

/// **选择结果**：要么包装一条广告内容，要么明确表示没有广告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedAdvertisement {
    Advertisement(AdvertisementContent),
    Empty,
}

impl GeneratedAdvertisement {
    pub fn has_advertisement(&self) -> bool {
        matches!(self, GeneratedAdvertisement::Advertisement(_))
    }

    pub fn content(&self) -> Option<&AdvertisementContent> {
        match self {
            GeneratedAdvertisement::Advertisement(content) => Some(content),
            GeneratedAdvertisement::Empty => None,
        }
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content().and_then(|c| c.content_id.as_deref())
    }
}

/// 对外输出格式：{ hasAdvertisement, contentId?, renderableContent? }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvertisementView<'a> {
    has_advertisement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    renderable_content: Option<&'a str>,
}

impl Serialize for GeneratedAdvertisement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = match self {
            GeneratedAdvertisement::Advertisement(content) => AdvertisementView {
                has_advertisement: true,
                content_id: content.content_id.as_deref(),
                renderable_content: Some(content.renderable_content.as_str()),
            },
            GeneratedAdvertisement::Empty => AdvertisementView {
                has_advertisement: false,
                content_id: None,
                renderable_content: None,
            },
        };
        view.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_serializes_without_content_fields() {
        let value = serde_json::to_value(GeneratedAdvertisement::Empty).unwrap();
        assert_eq!(value, json!({ "hasAdvertisement": false }));
    }

    #[test]
    fn advertisement_serializes_content() {
        let ad = GeneratedAdvertisement::Advertisement(AdvertisementContent::new(Some("A"), "<div>A</div>"));
        let value = serde_json::to_value(&ad).unwrap();
        assert_eq!(
            value,
            json!({ "hasAdvertisement": true, "contentId": "A", "renderableContent": "<div>A</div>" })
        );
        assert!(ad.has_advertisement());
        assert_eq!(ad.content_id(), Some("A"));
    }
}
