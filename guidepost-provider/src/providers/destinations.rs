use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ServiceConfig, parse_http_url};
use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::DestinationSource;
use crate::types::{Destination, DestinationResponse, GuidePostId};

const SERVICE: &str = "destinations";

/// Fixed generator options: resolve named routes, include arrow bearings,
/// JSON output, kilometre units, fast mode.
const QUERY_OPTIONS: &str = "namedroutes&fromarrow&format=json&distunit=km&fast=1";

/// Destination sign generator client.
#[derive(Debug, Clone)]
pub struct HttpDestinationSource {
    client: Client,
    endpoint: String,
}

impl HttpDestinationSource {
    /// 使用配置创建实例（自带 HTTP 客户端）
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Self::with_client(HttpUtils::build_client(config)?, config)
    }

    /// 使用外部 HTTP 客户端创建实例
    pub fn with_client(client: Client, config: &ServiceConfig) -> Result<Self> {
        parse_http_url("destinationUrl", &config.destination_url)?;
        Ok(Self {
            client,
            endpoint: config.destination_url.trim().to_string(),
        })
    }

    /// Generator URL for `node_id`.
    ///
    /// Several of the options are bare keys, which is why the query string
    /// is assembled by hand.
    pub fn url_for(&self, node_id: &GuidePostId) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}nodeid={}&{QUERY_OPTIONS}",
            self.endpoint,
            urlencoding::encode(node_id.as_str())
        )
    }
}

#[async_trait]
impl DestinationSource for HttpDestinationSource {
    fn id(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_destinations(&self, node_id: &GuidePostId) -> Result<Vec<Destination>> {
        let url = self.url_for(node_id);
        let body = HttpUtils::execute_request(self.client.get(&url), SERVICE, &url).await?;
        let response: DestinationResponse = HttpUtils::parse_json(&body, SERVICE)?;
        log::debug!(
            "[{SERVICE}] {} destinations for node {node_id}",
            response.data.len()
        );
        Ok(response.data)
    }
}
