// ==========================================
// 网店订单出货系统 - 出货检查清单 API
// ==========================================
// 职责: 检查清单的查询、整批追加、单条更新与删除
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::{ChecklistItem, ChecklistUpdate, NewChecklistItem};
use crate::repository::ChecklistRepository;

// ==========================================
// ChecklistApi - 检查清单 API
// ==========================================
pub struct ChecklistApi {
    repo: Arc<ChecklistRepository>,
}

impl ChecklistApi {
    /// 创建新的ChecklistApi实例
    pub fn new(repo: Arc<ChecklistRepository>) -> Self {
        Self { repo }
    }

    /// 查询全部清单条目（按 id 升序）
    pub fn list(&self) -> ApiResult<Vec<ChecklistItem>> {
        Ok(self.repo.list_all()?)
    }

    /// 查询未勾选的清单条目
    pub fn pending(&self) -> ApiResult<Vec<ChecklistItem>> {
        Ok(self.repo.list_pending()?)
    }

    /// 整批追加清单条目
    ///
    /// # 参数
    /// - items: 待追加的条目（可为空批，此时不产生写入）
    ///
    /// # 返回
    /// - Ok(usize): 追加的条数
    pub fn save_batch(&self, items: &[NewChecklistItem]) -> ApiResult<usize> {
        Ok(self.repo.append_items(items)?)
    }

    /// 按 id 部分更新（空更新为无操作，原样返回该条目）
    ///
    /// # 返回
    /// - Ok(item): 更新后的条目
    /// - Err(NotFound): id 不存在
    pub fn update(&self, id: i64, update: &ChecklistUpdate) -> ApiResult<ChecklistItem> {
        Ok(self.repo.update(id, update)?)
    }

    /// 按 id 删除（id 不存在时也视为成功）
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
