// ==========================================
// 网店订单出货系统 - 网店订单附注仓储
// ==========================================
// 职责: shop_order_metadata 表的数据访问
// 约定: tags 以 JSON 数组文本落库
// ==========================================

use crate::db;
use crate::domain::ShopOrderMetadata;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct OrderMetadataRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderMetadataRepository {
    /// 创建新的仓储实例
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

    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_metadata_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, bool)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn decode_row(raw: (i64, String, String, bool)) -> RepositoryResult<ShopOrderMetadata> {
        let (order_id, remark, tags_json, is_completed) = raw;
        let tags: Vec<String> = if tags_json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&tags_json)?
        };
        Ok(ShopOrderMetadata {
            order_id,
            remark,
            tags,
            is_completed,
        })
    }

    /// 按订单 id 查询附注
    pub fn get(&self, order_id: i64) -> RepositoryResult<Option<ShopOrderMetadata>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                "SELECT order_id, remark, tags, is_completed FROM shop_order_metadata WHERE order_id = ?1",
                params![order_id],
                Self::map_metadata_row,
            )
            .optional()?;

        raw.map(Self::decode_row).transpose()
    }

    /// 批量查询附注（单条 IN 查询）
    pub fn get_many(&self, order_ids: &[i64]) -> RepositoryResult<Vec<ShopOrderMetadata>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; order_ids.len()].join(",");
        let sql = format!(
            "SELECT order_id, remark, tags, is_completed FROM shop_order_metadata WHERE order_id IN ({placeholders})"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(order_ids.iter()), Self::map_metadata_row)?;

        let mut metadata = Vec::new();
        for row in rows {
            metadata.push(Self::decode_row(row?)?);
        }
        Ok(metadata)
    }

    /// 确保订单附注存在，缺失时建默认空行
    pub fn ensure_default(&self, order_id: i64) -> RepositoryResult<ShopOrderMetadata> {
        if let Some(existing) = self.get(order_id)? {
            return Ok(existing);
        }

        let default = ShopOrderMetadata::empty_for(order_id);
        self.upsert(&default)?;
        Ok(default)
    }

    /// 写入或覆盖订单附注（按主键）
    pub fn upsert(&self, metadata: &ShopOrderMetadata) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tags_json = serde_json::to_string(&metadata.tags)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO shop_order_metadata (order_id, remark, tags, is_completed)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![metadata.order_id, metadata.remark, tags_json, metadata.is_completed],
        )?;
        Ok(())
    }
}
