// ==========================================
// 白板导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 配置错误（不重试）/ 传输与超时（重试）/ 校验错误（不重试）
// ==========================================

use crate::domain::types::Platform;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 配置错误（立即失败，不重试）=====
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("平台未注册适配器: {0}")]
    AdapterMissing(Platform),

    // ===== 传输错误（可重试）=====
    #[error("平台 {platform} 请求失败: {message}")]
    Transport { platform: Platform, message: String },

    #[error("拉取超时 ({timeout_ms}ms)")]
    Timeout { timeout_ms: u64 },

    #[error("all import attempts failed ({attempts} attempts): {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<ImportError>,
    },

    // ===== 数据校验错误（立即失败，不重试）=====
    #[error("数据校验失败: {}", .0.join("; "))]
    Validation(Vec<String>),

    // ===== 解析错误 =====
    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ImportError {
    pub fn transport(platform: Platform, message: impl Into<String>) -> Self {
        ImportError::Transport {
            platform,
            message: message.into(),
        }
    }

    /// 是否可由重试编排器重试
    ///
    /// 超时与传输失败同等对待; 文件读取失败视为传输失败
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ImportError::Transport { .. } | ImportError::Timeout { .. } | ImportError::Io(_)
        )
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ImportError::transport(Platform::Miro, "503").is_retryable());
        assert!(ImportError::Timeout { timeout_ms: 10 }.is_retryable());
        assert!(!ImportError::Configuration("x".into()).is_retryable());
        assert!(!ImportError::Validation(vec!["x".into()]).is_retryable());
    }

    #[test]
    fn test_exhausted_message_wraps_last_error() {
        let err = ImportError::RetriesExhausted {
            attempts: 3,
            last: Box::new(ImportError::Timeout { timeout_ms: 50 }),
        };

        let message = err.to_string();
        assert!(message.starts_with("all import attempts failed"));
        assert!(message.contains("50ms"));
    }
}
