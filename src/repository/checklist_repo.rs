// ==========================================
// 网店订单出货系统 - 待办清单仓储
// ==========================================
// 职责: checklist_item 表的 CRUD 操作
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db;
use crate::domain::{ChecklistItem, ChecklistUpdate, NewChecklistItem};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ChecklistRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ChecklistRepository {
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

    fn map_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChecklistItem> {
        Ok(ChecklistItem {
            id: row.get(0)?,
            text: row.get(1)?,
            checked: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    /// 全部待办项（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<ChecklistItem>> {
        self.query_items("SELECT id, text, checked, created_at FROM checklist_item ORDER BY id ASC")
    }

    /// 未勾选的待办项（按 id 升序）
    pub fn list_pending(&self) -> RepositoryResult<Vec<ChecklistItem>> {
        self.query_items(
            "SELECT id, text, checked, created_at FROM checklist_item WHERE checked = 0 ORDER BY id ASC",
        )
    }

    fn query_items(&self, sql: &str) -> RepositoryResult<Vec<ChecklistItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], Self::map_item_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// 追加一批待办项（事务化）
    pub fn append_items(&self, items: &[NewChecklistItem]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let now = Utc::now();
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO checklist_item (text, checked, created_at) VALUES (?1, ?2, ?3)",
            )?;
            for item in items {
                stmt.execute(params![item.text, item.checked, now])?;
                count += 1;
            }
        }

        tx.commit()?;
        Ok(count)
    }

    /// 部分更新（text / checked 任一或两者）
    ///
    /// # 返回
    /// - Ok(item): 更新后的待办项
    /// - Err(NotFound): id 不存在
    pub fn update(&self, id: i64, update: &ChecklistUpdate) -> RepositoryResult<ChecklistItem> {
        let conn = self.get_conn()?;

        let existing = conn
            .query_row(
                "SELECT id, text, checked, created_at FROM checklist_item WHERE id = ?1",
                params![id],
                Self::map_item_row,
            )
            .optional()?;

        let mut item = existing.ok_or_else(|| RepositoryError::NotFound {
            entity: "checklist_item".to_string(),
            id: id.to_string(),
        })?;

        if let Some(checked) = update.checked {
            item.checked = checked;
        }
        if let Some(ref text) = update.text {
            item.text = text.clone();
        }

        conn.execute(
            "UPDATE checklist_item SET text = ?1, checked = ?2 WHERE id = ?3",
            params![item.text, item.checked, id],
        )?;

        Ok(item)
    }

    /// 按 id 删除（id 不存在时静默成功）
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM checklist_item WHERE id = ?1", params![id])?;
        Ok(())
    }
}
