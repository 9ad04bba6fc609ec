// ==========================================
// 网店订单出货系统 - 远端商店订单 API
// ==========================================
// 职责: 远端订单查询、本地附注合并与筛选、远端拣货清单
// 约定: 远端未配置时所有远端操作返回“未配置”错误
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ShopOrder, ShopOrderMetadata, ShopPickingItem};
use crate::engine::build_shop_picking_list;
use crate::repository::OrderMetadataRepository;
use crate::shop::{ShopOrderClient, MAX_BATCH_ORDER_IDS};

/// 处理中订单列表的筛选条件
#[derive(Debug, Clone, Default)]
pub struct ShopOrderFilter {
    /// 标签筛选（任一命中即保留；空列表不筛）
    pub tags: Vec<String>,
    /// 仅保留有本地备注的订单
    pub has_remark: bool,
    /// 仅保留有客户留言的订单
    pub has_customer_note: bool,
}

impl ShopOrderFilter {
    fn matches(&self, order: &ShopOrder) -> bool {
        if !self.tags.is_empty() {
            let any_tag = self
                .tags
                .iter()
                .any(|wanted| order.order_metadata.tags.iter().any(|tag| tag == wanted));
            if !any_tag {
                return false;
            }
        }

        if self.has_remark && order.order_metadata.remark.is_empty() {
            return false;
        }

        if self.has_customer_note && order.customer_note.is_empty() {
            return false;
        }

        true
    }
}

// ==========================================
// ShopOrderApi - 远端商店订单 API
// ==========================================
pub struct ShopOrderApi {
    client: Option<Arc<dyn ShopOrderClient>>,
    metadata_repo: Arc<OrderMetadataRepository>,
}

impl ShopOrderApi {
    /// 创建新的ShopOrderApi实例
    ///
    /// # 参数
    /// - client: 远端订单客户端（未配置时传 None）
    /// - metadata_repo: 本地附注仓储
    pub fn new(
        client: Option<Arc<dyn ShopOrderClient>>,
        metadata_repo: Arc<OrderMetadataRepository>,
    ) -> Self {
        Self {
            client,
            metadata_repo,
        }
    }

    fn client(&self) -> ApiResult<&Arc<dyn ShopOrderClient>> {
        self.client.as_ref().ok_or(ApiError::ShopApiNotConfigured)
    }

    /// 为一批远端订单合并本地附注
    ///
    /// 批量查出已有附注，缺失的订单当场补建默认空行。
    fn merge_metadata(&self, orders: &mut [ShopOrder]) -> ApiResult<()> {
        let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut existing: HashMap<i64, ShopOrderMetadata> = self
            .metadata_repo
            .get_many(&order_ids)?
            .into_iter()
            .map(|m| (m.order_id, m))
            .collect();

        for order in orders.iter_mut() {
            order.order_metadata = match existing.remove(&order.id) {
                Some(metadata) => metadata,
                None => self.metadata_repo.ensure_default(order.id)?,
            };
        }
        Ok(())
    }

    /// 查询处理中订单（合并附注后按条件筛选）
    ///
    /// # 参数
    /// - filter: 标签 / 备注 / 客户留言筛选
    ///
    /// # 返回
    /// - Ok(Vec<ShopOrder>): 通过筛选的订单（远端返回顺序）
    pub async fn list_processing_orders(
        &self,
        filter: &ShopOrderFilter,
    ) -> ApiResult<Vec<ShopOrder>> {
        let mut orders = self.client()?.fetch_processing_orders().await?;
        debug!(count = orders.len(), "已拉取处理中订单");

        self.merge_metadata(&mut orders)?;
        orders.retain(|order| filter.matches(order));
        Ok(orders)
    }

    /// 查询单笔远端订单（合并附注）
    pub async fn get_order(&self, order_id: i64) -> ApiResult<ShopOrder> {
        let mut order = self.client()?.fetch_order(order_id).await?;
        order.order_metadata = self.metadata_repo.ensure_default(order.id)?;
        Ok(order)
    }

    /// 更新订单的本地附注
    ///
    /// 附注的订单 id 以路径参数为准，载荷中的 order_id 被覆盖。
    pub fn update_metadata(
        &self,
        order_id: i64,
        mut metadata: ShopOrderMetadata,
    ) -> ApiResult<ShopOrderMetadata> {
        metadata.order_id = order_id;
        self.metadata_repo.upsert(&metadata)?;
        Ok(metadata)
    }

    /// 按 id 列表批量查询远端订单（合并附注）
    ///
    /// # 参数
    /// - order_ids: 远端订单 id（空列表直接返回空集；超过 100 笔拒绝）
    pub async fn fetch_batch(&self, order_ids: &[i64]) -> ApiResult<Vec<ShopOrder>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        if order_ids.len() > MAX_BATCH_ORDER_IDS {
            return Err(ApiError::InvalidInput(format!(
                "单次批量查询最多 {} 笔订单",
                MAX_BATCH_ORDER_IDS
            )));
        }

        let mut orders = self.client()?.fetch_orders_by_ids(order_ids).await?;
        self.merge_metadata(&mut orders)?;
        Ok(orders)
    }

    /// 远端订单拣货清单
    ///
    /// 处理中订单的商品行按名称汇总，数量降序、名称升序。
    pub async fn picking_list(&self) -> ApiResult<Vec<ShopPickingItem>> {
        let orders = self.client()?.fetch_processing_orders().await?;
        Ok(build_shop_picking_list(&orders))
    }
}
