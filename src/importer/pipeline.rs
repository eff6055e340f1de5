// ==========================================
// 白板导入系统 - 导入管道实现
// ==========================================
// 职责: 整合导入流程,从请求到规范快照
// 流程: 请求校验 → 选项钳制 → 重试拉取 → 转换 → 数据校验 → 优化 → 结果
// 红线: 任何错误都转换为 success=false 的结果,不向调用方抛出
// ==========================================

use crate::adapter::AdapterRegistry;
use crate::config::ImportLimits;
use crate::domain::request::ImportRequest;
use crate::domain::result::{ProcessingMetadata, ProcessingResult};
use crate::domain::types::Platform;
use crate::importer::config_validator::ConfigValidator;
use crate::importer::data_validator::DataValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_pipeline_trait::{
    ImportPipeline, RequestValidator, SnapshotOptimizer, SnapshotValidator,
};
use crate::importer::optimizer::Optimizer;
use crate::importer::retry_orchestrator::RetryOrchestrator;
use async_trait::async_trait;
use futures::future::join_all;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// ImportPipelineImpl - 导入管道实现
// ==========================================
pub struct ImportPipelineImpl {
    // 系统上限
    limits: ImportLimits,

    // 平台适配器
    registry: AdapterRegistry,

    // 管道组件
    request_validator: Box<dyn RequestValidator>,
    snapshot_validator: Box<dyn SnapshotValidator>,
    optimizer: Box<dyn SnapshotOptimizer>,
    orchestrator: RetryOrchestrator,
}

impl ImportPipelineImpl {
    /// 使用默认组件创建管道
    ///
    /// 请求校验器只接受 registry 中已注册的平台
    pub fn new(limits: ImportLimits, registry: AdapterRegistry) -> Self {
        let request_validator =
            ConfigValidator::with_platforms(limits.clone(), registry.platforms());
        let snapshot_validator = DataValidator::new(&limits);

        Self::with_components(
            limits,
            registry,
            Box::new(request_validator),
            Box::new(snapshot_validator),
            Box::new(Optimizer),
        )
    }

    /// 注入自定义组件
    ///
    /// # 参数
    /// - limits: 系统上限
    /// - registry: 平台适配器注册表
    /// - request_validator: 请求校验器
    /// - snapshot_validator: 快照校验器
    /// - optimizer: 快照优化器
    pub fn with_components(
        limits: ImportLimits,
        registry: AdapterRegistry,
        request_validator: Box<dyn RequestValidator>,
        snapshot_validator: Box<dyn SnapshotValidator>,
        optimizer: Box<dyn SnapshotOptimizer>,
    ) -> Self {
        let orchestrator = RetryOrchestrator::new(limits.clone());
        Self {
            limits,
            registry,
            request_validator,
            snapshot_validator,
            optimizer,
            orchestrator,
        }
    }

    pub fn limits(&self) -> &ImportLimits {
        &self.limits
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// 管道主体（错误向上传播，由 process_import 统一转换）
    async fn run(
        &self,
        request: &ImportRequest,
        warnings: &mut Vec<String>,
        started: Instant,
    ) -> ImportResult<ProcessingResult> {
        let platform = request.platform;

        // === 步骤 1: 请求校验 ===
        debug!("步骤 1: 请求校验");
        let validation = self.request_validator.validate(request);
        warnings.extend(validation.warnings);
        if !validation.is_valid {
            return Err(ImportError::Configuration(validation.errors.join("; ")));
        }

        // === 步骤 2: 选项钳制 + 适配器查找 ===
        let options = self.limits.clamp(&request.options);
        let adapter = self
            .registry
            .get(platform)
            .ok_or(ImportError::AdapterMissing(platform))?;

        // 校验通过时凭证必然存在
        let credentials = request
            .credentials
            .as_ref()
            .ok_or_else(|| ImportError::Configuration("缺少凭证".to_string()))?;

        // === 步骤 3: 重试拉取 + 转换 ===
        debug!(
            timeout_ms = options.timeout_ms,
            retry_attempts = options.retry_attempts,
            "步骤 3: 拉取平台数据"
        );
        let container = self
            .orchestrator
            .run_with_retry(adapter.as_ref(), credentials, &options)
            .await?;
        let snapshot = adapter.convert(container);

        // === 步骤 4: 数据校验 ===
        debug!(elements = snapshot.elements.len(), "步骤 4: 数据校验");
        let validation = self.snapshot_validator.validate(&snapshot, &options);
        warnings.extend(validation.warnings);
        if !validation.is_valid {
            return Err(ImportError::Validation(validation.errors));
        }
        let original_byte_size = validation.estimated_byte_size;

        // === 步骤 5: 优化 ===
        debug!("步骤 5: 快照优化");
        let optimized = self.optimizer.optimize(&snapshot);
        let stats = optimized.stats;
        // 开启逐元素校验时，无效元素警告已由数据校验器给出
        if stats.dropped_invalid > 0 && !options.validate_elements {
            warnings.push(format!("{} 个元素结构无效，已跳过", stats.dropped_invalid));
        }
        if stats.dropped_duplicates > 0 {
            warnings.push(format!("{} 个重复元素已合并", stats.dropped_duplicates));
        }

        let final_snapshot = optimized.snapshot;
        let mut metadata = ProcessingMetadata::new(platform, elapsed_ms(started));
        metadata.elements_processed = stats.final_element_count;
        metadata.original_byte_size = Some(original_byte_size);
        metadata.compressed_byte_size = Some(final_snapshot.estimated_byte_size());
        metadata.original_element_count = Some(stats.original_element_count);
        metadata.final_element_count = Some(stats.final_element_count);

        Ok(ProcessingResult::succeeded(
            final_snapshot,
            std::mem::take(warnings),
            metadata,
        ))
    }
}

#[async_trait]
impl ImportPipeline for ImportPipelineImpl {
    /// 执行单个导入请求
    ///
    /// # 返回
    /// - success=true: data 为优化后的快照, metadata 含字节数/元素数统计
    /// - success=false: error 为人类可读原因，已收集的 warnings 保留
    #[instrument(skip(self, request), fields(platform = %request.platform))]
    async fn process_import(&self, request: ImportRequest) -> ProcessingResult {
        let started = Instant::now();
        let platform = request.platform;
        info!("开始导入白板数据");

        let mut warnings = Vec::new();
        match self.run(&request, &mut warnings, started).await {
            Ok(result) => {
                info!(
                    elements = result
                        .metadata
                        .as_ref()
                        .map(|m| m.elements_processed)
                        .unwrap_or_default(),
                    warnings = result.warnings.len(),
                    elapsed_ms = elapsed_ms(started),
                    "白板导入成功"
                );
                result
            }
            Err(e) => {
                error!(error = %e, elapsed_ms = elapsed_ms(started), "白板导入失败");
                ProcessingResult::failed(
                    e.to_string(),
                    warnings,
                    Some(ProcessingMetadata::new(platform, elapsed_ms(started))),
                )
            }
        }
    }

    /// 批量导入（并发执行，结果与输入顺序一一对应）
    async fn process_batch(&self, requests: Vec<ImportRequest>) -> Vec<ProcessingResult> {
        info!(count = requests.len(), "开始批量导入");

        // 为每个请求创建导入任务
        let import_tasks = requests.into_iter().enumerate().map(|(index, request)| {
            let platform = request.platform;
            async move {
                match AssertUnwindSafe(self.process_import(request))
                    .catch_unwind()
                    .await
                {
                    Ok(result) => result,
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        error!(index, platform = %platform, panic = %message, "导入任务异常终止");
                        ProcessingResult::failed(
                            ImportError::Internal(message).to_string(),
                            Vec::new(),
                            Some(ProcessingMetadata::new(platform, 0)),
                        )
                    }
                }
            }
        });

        // 并发执行所有导入任务（join_all 按输入顺序返回）
        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.success).count(),
            failed = results.iter().filter(|r| !r.success).count(),
            "批量导入完成"
        );

        results
    }

    /// 各已注册平台的可达性探测（单个探测受默认超时约束）
    async fn health_check(&self) -> BTreeMap<Platform, bool> {
        let timeout = Duration::from_millis(self.limits.default_timeout_ms);

        let probes = self.registry.iter().map(|(platform, adapter)| async move {
            let reachable = tokio::time::timeout(timeout, adapter.test_connection())
                .await
                .unwrap_or_else(|_| {
                    warn!(platform = %platform, "连通性探测超时");
                    false
                });
            (*platform, reachable)
        });

        let health: BTreeMap<Platform, bool> = join_all(probes).await.into_iter().collect();
        info!(
            platforms = health.len(),
            reachable = health.values().filter(|ok| **ok).count(),
            "连通性探测完成"
        );
        health
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("导入任务 panic: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("导入任务 panic: {}", s)
    } else {
        "导入任务 panic".to_string()
    }
}
