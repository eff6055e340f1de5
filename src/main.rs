// ==========================================
// 白板导入系统 - 命令行入口
// ==========================================
// 用法:
//   whiteboard-import <requests.json>   批量导入，结果以 JSON 输出到 stdout
//   whiteboard-import --health          输出各平台连通性
//
// requests.json: ImportRequest 数组，逐条解析，单条错误不影响其他条目
// 当前注册 Excalidraw 本地文件适配器
// 上限可由 WHITEBOARD_IMPORT_* 环境变量覆写
// ==========================================

use anyhow::{bail, Context};
use std::sync::Arc;
use whiteboard_import::{
    logging, process_json_batch, AdapterRegistry, FileSource, ImportLimits, ImportPipeline,
    ImportPipelineImpl, MappedAdapter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let arg = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => bail!("用法: whiteboard-import <requests.json> | --health"),
    };

    tracing::info!(
        version = whiteboard_import::VERSION,
        "{} 启动",
        whiteboard_import::APP_NAME
    );

    let limits = ImportLimits::from_env();
    let registry = AdapterRegistry::new().register(Arc::new(MappedAdapter::excalidraw(FileSource)));
    let pipeline = ImportPipelineImpl::new(limits, registry);

    if arg == "--health" {
        let health = pipeline.health_check().await;
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let raw = tokio::fs::read_to_string(&arg)
        .await
        .with_context(|| format!("无法读取请求文件: {}", arg))?;
    // 逐条解析: 单条格式错误只记为该条失败
    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("请求文件必须是 JSON 数组: {}", arg))?;

    let results = process_json_batch(&pipeline, entries).await;
    println!("{}", serde_json::to_string_pretty(&results)?);

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "部分导入失败");
    }

    Ok(())
}
