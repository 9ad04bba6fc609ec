// ==========================================
// 网店订单出货系统 - 远端商店 API 客户端
// ==========================================
// 职责: 访问远端商店（WooCommerce 风格）的订单 REST API
// 约定: Basic Auth（consumer key / secret），非 2xx 视为失败并带回响应体
// ==========================================

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::ShopApiConfig;
use crate::domain::ShopOrder;

/// 批量查询单次上限
pub const MAX_BATCH_ORDER_IDS: usize = 100;

/// 远端客户端错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 未配置远端商店 API（缺少 SHOP_API_BASE_URL 等环境变量）
    #[error("远端商店 API 未配置")]
    NotConfigured,

    /// 网络层失败（连接、超时、响应体解码等）
    #[error("远端商店请求失败: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// 远端返回非成功状态码
    #[error("远端商店返回状态 {status}: {body}")]
    RemoteStatus { status: u16, body: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// 远端商店订单客户端接口
///
/// 抽出 trait 以便 API 层在测试中替换为内存桩实现。
#[async_trait]
pub trait ShopOrderClient: Send + Sync {
    /// 拉取全部“处理中”订单（单页，最多 100 笔）
    async fn fetch_processing_orders(&self) -> ClientResult<Vec<ShopOrder>>;

    /// 按远端订单 id 查询单笔订单
    async fn fetch_order(&self, order_id: i64) -> ClientResult<ShopOrder>;

    /// 按 id 列表批量查询订单；空列表直接返回空结果，不发请求
    async fn fetch_orders_by_ids(&self, order_ids: &[i64]) -> ClientResult<Vec<ShopOrder>>;
}

/// 基于 reqwest 的 HTTP 实现
pub struct HttpShopOrderClient {
    http: reqwest::Client,
    config: ShopApiConfig,
}

impl HttpShopOrderClient {
    /// 创建客户端
    ///
    /// # 参数
    /// - config: 远端商店 API 配置（根地址 + consumer key/secret）
    pub fn new(config: ShopApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    /// 发起 GET 请求并解码 JSON 响应
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!(url = %url, "请求远端商店 API");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ShopOrderClient for HttpShopOrderClient {
    async fn fetch_processing_orders(&self) -> ClientResult<Vec<ShopOrder>> {
        let url = format!(
            "{}/orders?status=processing&per_page=100",
            self.config.base_url
        );
        self.get_json(&url).await
    }

    async fn fetch_order(&self, order_id: i64) -> ClientResult<ShopOrder> {
        let url = format!("{}/orders/{}", self.config.base_url, order_id);
        self.get_json(&url).await
    }

    async fn fetch_orders_by_ids(&self, order_ids: &[i64]) -> ClientResult<Vec<ShopOrder>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let include = order_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/orders?include={}&per_page={}",
            self.config.base_url,
            include,
            order_ids.len()
        );
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> HttpShopOrderClient {
        let config = ShopApiConfig {
            base_url: "https://shop.example.com/wp-json/wc/v3".to_string(),
            api_key: "ck_test".to_string(),
            api_secret: "cs_test".to_string(),
        };
        HttpShopOrderClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_batch_empty_ids_skips_request() {
        // 空 id 列表不应触发网络请求，直接返回空集
        let client = test_client();
        let orders = client.fetch_orders_by_ids(&[]).await.unwrap();
        assert!(orders.is_empty());
    }
}
