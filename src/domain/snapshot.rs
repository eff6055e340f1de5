// ==========================================
// 白板导入系统 - 规范快照模型
// ==========================================
// 职责: 一次导入产出的完整白板快照
// 生命周期: 适配器转换生成 → 优化器产出新快照（不原地修改）
// ==========================================

use crate::domain::element::CanonicalElement;
use crate::domain::types::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CanonicalSnapshot - 规范快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub elements: Vec<CanonicalElement>,
    pub metadata: SnapshotMetadata,
}

// ==========================================
// SnapshotMetadata - 来源信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub source_platform: Platform,                // 来源平台
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,               // 原始地址
    pub imported_at: DateTime<Utc>,               // 导入时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,                    // 所有者
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,                // 工作区/团队
}

impl SnapshotMetadata {
    pub fn new(source_platform: Platform) -> Self {
        Self {
            source_platform,
            origin_url: None,
            imported_at: Utc::now(),
            owner: None,
            workspace: None,
        }
    }
}

impl CanonicalSnapshot {
    /// 估算序列化字节数（JSON 编码长度）
    ///
    /// 编码失败（理论上不会发生）时返回 usize::MAX，使上限校验必然失败
    pub fn estimated_byte_size(&self) -> usize {
        serde_json::to_vec(self)
            .map(|bytes| bytes.len())
            .unwrap_or(usize::MAX)
    }
}
