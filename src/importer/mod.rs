// ==========================================
// 白板导入系统 - 导入层
// ==========================================
// 职责: 导入请求 → 规范快照的完整管道
// 流程: 请求校验 → 重试拉取 → 数据校验 → 优化
// ==========================================

// 模块声明
pub mod config_validator;
pub mod data_validator;
pub mod error;
pub mod import_pipeline_trait;
pub mod optimizer;
pub mod pipeline;
pub mod request_parser;
pub mod retry_orchestrator;

// 重导出核心类型
pub use config_validator::ConfigValidator as ConfigValidatorImpl;
pub use data_validator::DataValidator as DataValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use optimizer::Optimizer as OptimizerImpl;
pub use pipeline::ImportPipelineImpl;
pub use request_parser::{parse_request, process_json_batch};
pub use retry_orchestrator::RetryOrchestrator;

// 重导出 Trait 接口
pub use import_pipeline_trait::{
    ImportPipeline, OptimizationStats, OptimizedSnapshot, RequestValidator, SnapshotOptimizer,
    SnapshotValidator,
};
