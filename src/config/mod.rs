// ==========================================
// 白板导入系统 - 配置层
// ==========================================
// 职责: 系统级上限配置,构造时注入导入管道
// 来源: 代码默认值,可由 WHITEBOARD_IMPORT_* 环境变量覆写
// ==========================================

pub mod import_limits;

// 重导出核心配置
pub use import_limits::ImportLimits;
