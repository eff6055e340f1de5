// ==========================================
// 白板导入系统 - 核心库
// ==========================================
// 职责: 多平台白板数据导入、校验、规范化
// 平台: Miro / FigJam / Lucidchart / Mural / Excalidraw
// 定位: 导入管道核心（传输细节由适配器注入）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 请求/元素/快照/结果
pub mod domain;

// 适配层 - 平台原生数据转换
pub mod adapter;

// 导入层 - 校验/重试/优化管道
pub mod importer;

// 配置层 - 系统上限
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Platform, ShapeType, TextAlign};

// 领域实体
pub use domain::{
    CanonicalElement, CanonicalSnapshot, Credentials, ElementKind, ImportOptions, ImportRequest,
    ProcessingMetadata, ProcessingResult, SnapshotMetadata, ValidationResult,
};

// 适配器
pub use adapter::{AdapterRegistry, FileSource, MappedAdapter, NativeSource, PlatformAdapter};

// 导入管道
pub use importer::{
    process_json_batch, ImportError, ImportPipeline, ImportPipelineImpl, ImportResult,
};

// 配置
pub use config::ImportLimits;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "白板导入系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
