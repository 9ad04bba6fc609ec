// ==========================================
// 网店订单出货系统 - 出货检查清单模型
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 检查清单条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,                       // 数据库自增主键
    pub text: String,                  // 条目内容
    pub checked: bool,                 // 是否已勾选
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,     // 创建时间
}

/// 整批保存时提交的清单条目（无 id，由数据库分配）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChecklistItem {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

/// 单条更新的增量字段（缺省字段保持原值）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistUpdate {
    pub text: Option<String>,
    pub checked: Option<bool>,
}
