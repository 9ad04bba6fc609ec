// ==========================================
// 网店订单出货系统 - 上传订单仓储
// ==========================================
// 职责: uploaded_order / upload_event 两张表的数据访问
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约定: 批次写入与清空订单必须走事务
// ==========================================

use crate::db;
use crate::domain::{OrderLineRecord, UploadEvent};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

/// 订单明细的查询排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    /// 按写入顺序（id 升序）
    InsertionAsc,
    /// 最新写入在前（id 降序）
    InsertionDesc,
    /// 订购时间降序，同时间新记录在前——订单汇总的输入顺序
    OrderedAtDesc,
    /// 商品名、订单编号升序——拣货清单的输入顺序
    ProductThenOrder,
}

impl RecordOrder {
    fn order_by_clause(self) -> &'static str {
        match self {
            RecordOrder::InsertionAsc => "ORDER BY id ASC",
            RecordOrder::InsertionDesc => "ORDER BY id DESC",
            RecordOrder::OrderedAtDesc => "ORDER BY ordered_at DESC, id DESC",
            RecordOrder::ProductThenOrder => "ORDER BY product_name ASC, order_no ASC",
        }
    }
}

// ==========================================
// UploadOrderStore Trait
// ==========================================
// 用途: 订单汇入链路的存取接口
// 实现者: UploadedOrderRepository（使用 rusqlite）
#[async_trait]
pub trait UploadOrderStore: Send + Sync {
    /// 一个事务内写入整批订单明细与对应的上传事件
    ///
    /// # 参数
    /// - records: 已通过校验的订单明细（可为空，空批仍记录事件）
    /// - event: 本次上传的台账事件
    ///
    /// # 返回
    /// - Ok(usize): 写入的明细条数
    /// - Err: 数据库错误（整个事务回滚）
    async fn save_ingestion(
        &self,
        records: Vec<OrderLineRecord>,
        event: UploadEvent,
    ) -> RepositoryResult<usize>;

    /// 按指定排序读取全部订单明细
    async fn list_records(&self, order: RecordOrder) -> RepositoryResult<Vec<OrderLineRecord>>;

    /// 清空订单明细并重置自增序列（事务化）
    ///
    /// 上传台账不受影响。
    async fn clear_all(&self) -> RepositoryResult<()>;

    /// 最近一次上传事件
    ///
    /// # 返回
    /// - Ok(Some(event)): 最近的上传事件
    /// - Ok(None): 台账为空
    async fn last_upload_event(&self) -> RepositoryResult<Option<UploadEvent>>;

    /// 统计订单明细条数
    async fn count_records(&self) -> RepositoryResult<usize>;
}

// ==========================================
// UploadedOrderRepository
// ==========================================
pub struct UploadedOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UploadedOrderRepository {
    /// 创建新的仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中批量写入订单明细
    fn insert_records_tx(tx: &Transaction, records: &[OrderLineRecord]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO uploaded_order (
                order_no, ordered_at, receiver_name, address,
                product_name, unit_price, discount_price, qty, note
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;

        let mut count = 0;
        for record in records {
            stmt.execute(params![
                record.order_no,
                record.ordered_at,
                record.receiver_name,
                record.address,
                record.product_name,
                record.unit_price,
                record.discount_price,
                record.qty,
                record.note,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    fn map_record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderLineRecord> {
        Ok(OrderLineRecord {
            order_no: row.get(0)?,
            ordered_at: row.get(1)?,
            receiver_name: row.get(2)?,
            address: row.get(3)?,
            product_name: row.get(4)?,
            unit_price: row.get(5)?,
            discount_price: row.get(6)?,
            qty: row.get(7)?,
            note: row.get(8)?,
        })
    }
}

#[async_trait]
impl UploadOrderStore for UploadedOrderRepository {
    async fn save_ingestion(
        &self,
        records: Vec<OrderLineRecord>,
        event: UploadEvent,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let count = Self::insert_records_tx(&tx, &records)?;
        tx.execute(
            "INSERT INTO upload_event (batch_id, uploaded_at) VALUES (?1, ?2)",
            params![event.batch_id, event.uploaded_at],
        )?;

        tx.commit()?;
        Ok(count)
    }

    async fn list_records(&self, order: RecordOrder) -> RepositoryResult<Vec<OrderLineRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT order_no, ordered_at, receiver_name, address,
                   product_name, unit_price, discount_price, qty, note
            FROM uploaded_order
            {}
            "#,
            order.order_by_clause()
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_record_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn clear_all(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM uploaded_order", [])?;
        // sqlite_sequence 只在发生过 AUTOINCREMENT 写入后才存在
        if db::table_exists(&tx, "sqlite_sequence")? {
            tx.execute(
                "DELETE FROM sqlite_sequence WHERE name = 'uploaded_order'",
                [],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn last_upload_event(&self) -> RepositoryResult<Option<UploadEvent>> {
        let conn = self.get_conn()?;
        let event = conn
            .query_row(
                "SELECT batch_id, uploaded_at FROM upload_event ORDER BY uploaded_at DESC, id DESC LIMIT 1",
                [],
                |row| {
                    Ok(UploadEvent {
                        batch_id: row.get(0)?,
                        uploaded_at: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(event)
    }

    async fn count_records(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM uploaded_order", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
