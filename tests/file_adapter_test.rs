// ==========================================
// 本地文件适配器端到端测试
// ==========================================
// 测试目标: Excalidraw 导出文件 → 规范快照
// ==========================================

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use whiteboard_import::{
    AdapterRegistry, Credentials, ElementKind, FileSource, ImportLimits, ImportPipeline,
    ImportPipelineImpl, ImportRequest, MappedAdapter, Platform, ShapeType,
};

fn excalidraw_pipeline() -> ImportPipelineImpl {
    let registry = AdapterRegistry::new().register(Arc::new(MappedAdapter::excalidraw(FileSource)));
    ImportPipelineImpl::new(ImportLimits::default(), registry)
}

fn file_request(path: &str) -> ImportRequest {
    ImportRequest::new(
        Platform::Excalidraw,
        Credentials::new().with("file_path", path),
    )
}

#[tokio::test]
async fn test_import_excalidraw_scene() {
    let mut file = NamedTempFile::new().expect("无法创建临时文件");
    write!(
        file,
        "{}",
        serde_json::json!({
            "type": "excalidraw",
            "version": 2,
            "source": "https://excalidraw.com",
            "elements": [
                {
                    "id": "rect-1",
                    "type": "rectangle",
                    "x": 100.123,
                    "y": 200,
                    "width": 80,
                    "height": 40,
                    "backgroundColor": "#a5d8ff",
                    "strokeColor": "",
                    "strokeWidth": 1
                },
                {
                    "id": "arrow-1",
                    "type": "arrow",
                    "x": 10,
                    "y": 20,
                    "points": [[0, 0], [90, 180]],
                    "strokeStyle": "dashed"
                },
                {"id": "gone", "type": "text", "x": 0, "y": 0, "isDeleted": true},
                {"id": "embed-1", "type": "embeddable", "x": 5, "y": 5, "link": ""}
            ]
        })
    )
    .expect("写入失败");

    let pipeline = excalidraw_pipeline();
    let result = pipeline
        .process_import(file_request(file.path().to_str().unwrap()))
        .await;

    assert!(result.success, "error: {:?}", result.error);
    let snapshot = result.data.unwrap();
    assert_eq!(snapshot.metadata.source_platform, Platform::Excalidraw);
    assert_eq!(
        snapshot.metadata.origin_url.as_deref(),
        Some("https://excalidraw.com")
    );

    let ids: Vec<&str> = snapshot.elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["embed-1", "arrow-1", "rect-1"]);

    let rect = &snapshot.elements[2];
    assert_eq!(rect.x, 100.12);
    match &rect.kind {
        ElementKind::Shape(shape) => {
            assert_eq!(shape.shape, ShapeType::Rectangle);
            assert_eq!(shape.fill_color, "#a5d8ff");
            assert_eq!(shape.stroke_width, 1.0);
        }
        other => panic!("rect-1 应为形状: {:?}", other),
    }

    match &snapshot.elements[1].kind {
        ElementKind::Arrow(arrow) => {
            assert_eq!(arrow.points.len(), 2);
            assert!(arrow.dashed);
            assert!(arrow.end_arrowhead);
        }
        other => panic!("arrow-1 应为箭头: {:?}", other),
    }

    // 未知类型保留原始字段，空字符串属性被剥离
    match &snapshot.elements[0].kind {
        ElementKind::Unknown { original_type, raw } => {
            assert_eq!(original_type, "embeddable");
            assert!(raw.get("link").is_none());
        }
        other => panic!("embed-1 应为 unknown: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_is_not_retried() {
    let dir = tempfile::tempdir().expect("无法创建临时目录");
    let path = dir.path().join("missing.excalidraw");

    let pipeline = excalidraw_pipeline();
    let result = pipeline
        .process_import(file_request(path.to_str().unwrap()))
        .await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("导入文件不存在"), "error: {}", error);
    assert!(!error.starts_with("all import attempts failed"));
}

#[tokio::test]
async fn test_malformed_json_fails() {
    let mut file = NamedTempFile::new().expect("无法创建临时文件");
    write!(file, "{{ not json").expect("写入失败");

    let pipeline = excalidraw_pipeline();
    let result = pipeline
        .process_import(file_request(file.path().to_str().unwrap()))
        .await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("JSON"));
}
