use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ServiceConfig, parse_http_url};
use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::AttributesSource;
use crate::types::{GuidePostAttributes, GuidePostId};

const SERVICE: &str = "attributes";

/// Attributes API client (`GET <api_url>/details/guidepost/<id>`).
#[derive(Debug, Clone)]
pub struct HttpAttributesSource {
    client: Client,
    base_url: String,
}

impl HttpAttributesSource {
    /// 使用配置创建实例（自带 HTTP 客户端）
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Self::with_client(HttpUtils::build_client(config)?, config)
    }

    /// 使用外部 HTTP 客户端创建实例
    pub fn with_client(client: Client, config: &ServiceConfig) -> Result<Self> {
        parse_http_url("apiUrl", &config.api_url)?;
        Ok(Self {
            client,
            base_url: config.api_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Detail URL for `id`; the id is encoded as one path segment.
    pub fn url_for(&self, id: &GuidePostId) -> String {
        format!(
            "{}/details/guidepost/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }
}

#[async_trait]
impl AttributesSource for HttpAttributesSource {
    fn id(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_attributes(&self, id: &GuidePostId) -> Result<GuidePostAttributes> {
        let url = self.url_for(id);
        let body = HttpUtils::execute_request(self.client.get(&url), SERVICE, &url).await?;
        HttpUtils::parse_json(&body, SERVICE)
    }
}
