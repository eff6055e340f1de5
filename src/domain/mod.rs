// ==========================================
// 白板导入系统 - 领域模型层
// ==========================================
// 职责: 定义导入请求、规范元素/快照、校验与处理结果
// 红线: 不含网络访问逻辑,不含管道编排逻辑
// ==========================================

pub mod element;
pub mod request;
pub mod result;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use element::{
    CanonicalElement, CodeContent, ConnectorContent, ElementKind, ImageContent, PathContent,
    Point, ShapeContent, StickyContent, TextContent,
};
pub use request::{Credentials, EffectiveOptions, ImportOptions, ImportRequest};
pub use result::{ProcessingMetadata, ProcessingResult, ValidationResult};
pub use snapshot::{CanonicalSnapshot, SnapshotMetadata};
pub use types::{Platform, ShapeType, TextAlign};
