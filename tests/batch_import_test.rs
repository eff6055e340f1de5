// ==========================================
// 批量导入测试
// ==========================================
// 测试目标: 验证批量导入的顺序对齐与失败隔离
// ==========================================


use std::sync::Arc;
use std::time::Duration;
use test_helpers::*;
use whiteboard_import::adapter::NativeItem;
use whiteboard_import::{
    logging, process_json_batch, AdapterRegistry, ImportLimits, ImportPipeline,
    ImportPipelineImpl, ImportRequest, MappedAdapter, Platform,
};

#[tokio::test]
async fn test_batch_results_align_with_input_order() {
    logging::init_test();

    let pipeline = miro_pipeline(StaticSource::new(sample_board()));
    let bad = ImportRequest {
        credentials: None,
        ..miro_request()
    };

    let results = pipeline.process_batch(vec![miro_request(), bad]).await;

    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].error.as_deref().unwrap().contains("缺少凭证"));
}

#[tokio::test(start_paused = true)]
async fn test_batch_order_independent_of_completion_order() {
    let slow = DelayedSource {
        delay: Duration::from_millis(500),
        container: board("slow", vec![NativeItem::new("s", "text", 0.0, 0.0)]),
    };
    let fast = DelayedSource {
        delay: Duration::from_millis(10),
        container: board("fast", vec![NativeItem::new("f", "text", 0.0, 0.0)]),
    };
    let registry = AdapterRegistry::new()
        .register(Arc::new(MappedAdapter::miro(slow)))
        .register(Arc::new(MappedAdapter::mural(fast)));
    let pipeline = ImportPipelineImpl::new(ImportLimits::default(), registry);

    let results = pipeline
        .process_batch(vec![miro_request(), mural_request(), miro_request()])
        .await;

    let ids: Vec<String> = results
        .iter()
        .map(|r| r.data.as_ref().map(|d| d.id.clone()).unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["slow", "fast", "slow"]);
}

#[tokio::test]
async fn test_batch_isolates_panicking_adapter() {
    let registry = AdapterRegistry::new()
        .register(Arc::new(MappedAdapter::miro(StaticSource::new(sample_board()))))
        .register(Arc::new(MappedAdapter::mural(PanickingSource)));
    let pipeline = ImportPipelineImpl::new(ImportLimits::default(), registry);

    let results = pipeline
        .process_batch(vec![mural_request(), miro_request(), mural_request()])
        .await;

    assert_eq!(results.len(), 3);
    assert!(!results[0].success);
    assert!(results[0].error.as_deref().unwrap().contains("adapter bug"));
    assert_eq!(
        results[0].metadata.as_ref().map(|m| m.platform),
        Some(Platform::Mural)
    );
    assert!(results[1].success);
    assert!(!results[2].success);
}

#[tokio::test]
async fn test_empty_batch() {
    let pipeline = miro_pipeline(StaticSource::new(sample_board()));

    let results = pipeline.process_batch(Vec::new()).await;

    assert!(results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_batch_failure_does_not_delay_other_requests() {
    // 一个请求持续超时重试，另一个请求应独立完成
    let recorder = RecordingSource::new(sample_board());
    let registry = AdapterRegistry::new()
        .register(Arc::new(MappedAdapter::miro(PendingSource)))
        .register(Arc::new(MappedAdapter::mural(recorder.clone())));
    let pipeline = ImportPipelineImpl::new(ImportLimits::default(), registry);

    let start = tokio::time::Instant::now();
    let results = pipeline
        .process_batch(vec![miro_request(), mural_request()])
        .await;
    let batch_elapsed = start.elapsed();

    assert!(!results[0].success);
    assert!(results[1].success);

    // 失败请求耗尽 3 次 30s 超时 + 1s/2s 退避
    assert!(batch_elapsed >= Duration::from_secs(93));

    // 成功请求在失败请求第一次超时之前已完成拉取（拉取后不再挂起）
    let fetched_at = recorder.fetched_at().expect("成功请求应已拉取");
    assert!(fetched_at.duration_since(start) < Duration::from_secs(1));
}

#[tokio::test]
async fn test_json_batch_isolates_unparseable_entries() {
    let pipeline = miro_pipeline(StaticSource::new(sample_board()));
    let entries = vec![
        serde_json::json!({
            "platform": "miro",
            "credentials": {"access_token": "token", "board_id": "uXjVO"}
        }),
        serde_json::json!({"platform": "trello"}),
        serde_json::json!({"platform": "miro", "options": {"retry_attempts": "many"}}),
        serde_json::json!({
            "platform": "Miro",
            "credentials": {"access_token": "token", "board_id": "uXjVO"}
        }),
    ];

    let results = process_json_batch(&pipeline, entries).await;

    assert_eq!(results.len(), 4);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].error.as_deref().unwrap().contains("不支持的平台: trello"));
    assert!(results[1].metadata.is_none());
    assert!(!results[2].success);
    assert!(results[2].error.as_deref().unwrap().contains("导入请求格式错误"));
    assert_eq!(
        results[2].metadata.as_ref().map(|m| m.platform),
        Some(Platform::Miro)
    );
    assert!(results[3].success);
}
