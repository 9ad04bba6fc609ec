// ==========================================
// 网店订单出货系统 - 上传订单 API
// ==========================================
// 职责: 表格上传、订单明细查询、汇总视图、清空
// 约定: 汇总视图为派生数据，现算不落库
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::{OrderLineRecord, OrderSummary, PickingItem};
use crate::engine::{build_order_summaries, build_picking_items};
use crate::importer::OrderBatchImporter;
use crate::repository::{RecordOrder, UploadOrderStore, UploadedOrderRepository};

// ==========================================
// OrderUploadApi - 上传订单 API
// ==========================================

/// 上传订单API
///
/// 职责：
/// 1. 上传表格汇入（整批成功或整批拒绝）
/// 2. 订单明细查询（最新写入在前）
/// 3. 订单汇总 / 拣货清单（派生视图）
/// 4. 最近上传时间查询、全量清空
pub struct OrderUploadApi {
    store: UploadedOrderRepository,
    importer: OrderBatchImporter<UploadedOrderRepository>,
}

impl OrderUploadApi {
    /// 创建新的OrderUploadApi实例
    ///
    /// # 参数
    /// - conn: 共享数据库连接
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        let store = UploadedOrderRepository::from_connection(conn.clone());
        let importer = OrderBatchImporter::new(UploadedOrderRepository::from_connection(conn));
        Self { store, importer }
    }

    /// 汇入上传的表格文件
    ///
    /// # 参数
    /// - file_name: 原始文件名（决定解析器，仅接受 .xlsx / .csv）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(usize): 落库的明细条数
    /// - Err(ApiError): 文件、表头或行级错误（此时无任何写入）
    pub async fn upload_workbook(&self, file_name: &str, bytes: &[u8]) -> ApiResult<usize> {
        let count = self.importer.import_workbook(file_name, bytes).await?;
        Ok(count)
    }

    /// 查询全部订单明细（最新写入在前）
    pub async fn list_records(&self) -> ApiResult<Vec<OrderLineRecord>> {
        Ok(self.store.list_records(RecordOrder::InsertionDesc).await?)
    }

    /// 订单维度汇总视图
    ///
    /// 输入按订购时间降序喂入汇总引擎，保证同订单取值顺序稳定。
    pub async fn list_summaries(&self) -> ApiResult<Vec<OrderSummary>> {
        let records = self.store.list_records(RecordOrder::OrderedAtDesc).await?;
        Ok(build_order_summaries(&records))
    }

    /// 商品维度拣货清单
    pub async fn list_picking(&self) -> ApiResult<Vec<PickingItem>> {
        let records = self
            .store
            .list_records(RecordOrder::ProductThenOrder)
            .await?;
        Ok(build_picking_items(&records))
    }

    /// 最近一次上传时间
    ///
    /// # 返回
    /// - Ok(Some(ts)): 最近一次上传的时间
    /// - Ok(None): 尚无上传记录
    pub async fn last_upload_time(&self) -> ApiResult<Option<DateTime<Utc>>> {
        let event = self.store.last_upload_event().await?;
        Ok(event.map(|e| e.uploaded_at))
    }

    /// 清空全部订单明细并重置自增序列
    ///
    /// 上传台账保留，方便追溯历次上传。
    pub async fn clear_all(&self) -> ApiResult<()> {
        self.store.clear_all().await?;
        info!("已清空上传订单明细");
        Ok(())
    }
}
