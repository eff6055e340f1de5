// ==========================================
// 白板导入系统 - 校验与处理结果
// ==========================================
// 职责: 校验器输出 (ValidationResult) + 管道最终输出 (ProcessingResult)
// 红线: errors 阻断管道; warnings 仅提示
// ==========================================

use crate::domain::snapshot::CanonicalSnapshot;
use crate::domain::types::Platform;
use serde::{Deserialize, Serialize};

// ==========================================
// ValidationResult - 校验结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub element_count: usize,
    pub estimated_byte_size: usize,
}

impl ValidationResult {
    /// 空结果（有效、无错误）
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            ..Self::default()
        }
    }

    /// 追加阻断错误
    pub fn error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    /// 追加提示警告
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

// ==========================================
// ProcessingMetadata - 处理统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub elements_processed: usize,
    pub processing_time_ms: u64,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_byte_size: Option<usize>,   // 优化前估算字节数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_byte_size: Option<usize>, // 优化后估算字节数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_element_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_element_count: Option<usize>,
}

impl ProcessingMetadata {
    pub fn new(platform: Platform, processing_time_ms: u64) -> Self {
        Self {
            elements_processed: 0,
            processing_time_ms,
            platform,
            original_byte_size: None,
            compressed_byte_size: None,
            original_element_count: None,
            final_element_count: None,
        }
    }
}

// ==========================================
// ProcessingResult - 管道输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CanonicalSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProcessingMetadata>,
}

impl ProcessingResult {
    pub fn succeeded(
        data: CanonicalSnapshot,
        warnings: Vec<String>,
        metadata: ProcessingMetadata,
    ) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            warnings,
            metadata: Some(metadata),
        }
    }

    pub fn failed(
        error: impl Into<String>,
        warnings: Vec<String>,
        metadata: Option<ProcessingMetadata>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            warnings,
            metadata,
        }
    }
}
