// ==========================================
// 白板导入系统 - 平台适配层
// ==========================================
// 职责: 平台原生数据 → 规范快照
// 契约: test_connection / fetch_native / convert
// 传输: 网络/鉴权细节由注入的 NativeSource 负责
// ==========================================

// 模块声明
pub mod adapter_trait;
pub mod file_source;
pub mod kind_mapping;
pub mod mapped_adapter;
pub mod platforms;
pub mod registry;

// 重导出核心类型
pub use adapter_trait::{NativeItem, NativeSource, PlatformAdapter, PlatformContainer};
pub use file_source::FileSource;
pub use kind_mapping::{KindRule, KindTable};
pub use mapped_adapter::MappedAdapter;
pub use platforms::kind_table;
pub use registry::AdapterRegistry;
