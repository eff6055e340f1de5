// ==========================================
// 白板导入系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 请求校验 → 重试拉取 → 数据校验 → 优化 → 结果
// ==========================================

use crate::domain::request::{EffectiveOptions, ImportRequest};
use crate::domain::result::{ProcessingResult, ValidationResult};
use crate::domain::snapshot::CanonicalSnapshot;
use crate::domain::types::Platform;
use async_trait::async_trait;
use std::collections::BTreeMap;

// ==========================================
// ImportPipeline Trait
// ==========================================
// 用途: 导入主接口
// 实现者: ImportPipelineImpl
#[async_trait]
pub trait ImportPipeline: Send + Sync {
    /// 执行单个导入请求
    ///
    /// # 返回
    /// - ProcessingResult: 成功或失败均以结果返回，不向调用方抛出错误
    async fn process_import(&self, request: ImportRequest) -> ProcessingResult;

    /// 批量导入（并发执行）
    ///
    /// # 返回
    /// - Vec<ProcessingResult>: 与输入顺序一一对应
    ///
    /// # 说明
    /// - 每个请求独立执行完整管道
    /// - 单个请求失败（含 panic）只影响其自身结果
    async fn process_batch(&self, requests: Vec<ImportRequest>) -> Vec<ProcessingResult>;

    /// 各已注册平台的可达性探测
    async fn health_check(&self) -> BTreeMap<Platform, bool>;
}

// ==========================================
// RequestValidator Trait
// ==========================================
// 用途: 请求配置校验（阶段 0，无网络访问）
// 实现者: ConfigValidatorImpl
pub trait RequestValidator: Send + Sync {
    /// 校验导入请求
    ///
    /// # 规则
    /// - 平台不受支持 / 凭证缺失 / 缺少平台必填字段 → 错误
    /// - max_elements / timeout_ms 超过系统上限 → 警告（按上限钳制）
    fn validate(&self, request: &ImportRequest) -> ValidationResult;
}

// ==========================================
// SnapshotValidator Trait
// ==========================================
// 用途: 拉取结果校验（阶段 2）
// 实现者: DataValidatorImpl
pub trait SnapshotValidator: Send + Sync {
    /// 校验转换后的快照
    ///
    /// # 参数
    /// - snapshot: 适配器转换结果
    /// - options: 钳制后的请求选项
    fn validate(&self, snapshot: &CanonicalSnapshot, options: &EffectiveOptions)
        -> ValidationResult;
}

// ==========================================
// SnapshotOptimizer Trait
// ==========================================
// 用途: 快照清洗/去重/排序（阶段 3）
// 实现者: OptimizerImpl
pub trait SnapshotOptimizer: Send + Sync {
    /// 生成优化后的新快照（纯函数，不会失败）
    fn optimize(&self, snapshot: &CanonicalSnapshot) -> OptimizedSnapshot;
}

// ==========================================
// OptimizedSnapshot - 优化产物
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedSnapshot {
    pub snapshot: CanonicalSnapshot,
    pub stats: OptimizationStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationStats {
    pub original_element_count: usize,
    pub final_element_count: usize,
    pub dropped_invalid: usize,    // 结构无效而剔除
    pub dropped_duplicates: usize, // 重复 id 而合并
}
