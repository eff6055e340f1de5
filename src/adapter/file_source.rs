// ==========================================
// 白板导入系统 - 本地导出文件传输源
// ==========================================
// 职责: 读取本地 JSON 导出文件（Excalidraw 场景或通用容器）
// 凭证: file_path
// ==========================================

use crate::adapter::adapter_trait::{NativeItem, NativeSource, PlatformContainer};
use crate::domain::request::Credentials;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, instrument};

pub struct FileSource;

#[async_trait]
impl NativeSource for FileSource {
    /// 本地文件无远端可达性问题
    async fn probe(&self) -> bool {
        true
    }

    #[instrument(skip(self, credentials))]
    async fn fetch(&self, credentials: &Credentials) -> ImportResult<PlatformContainer> {
        let file_path = credentials
            .get("file_path")
            .ok_or_else(|| ImportError::Configuration("缺少凭证字段: file_path".to_string()))?;

        let bytes = tokio::fs::read(file_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ImportError::Configuration(format!("导入文件不存在: {}", file_path))
            }
            ErrorKind::PermissionDenied => {
                ImportError::Configuration(format!("无权读取导入文件: {}", file_path))
            }
            _ => ImportError::Io(e),
        })?;
        debug!(file_path = %file_path, bytes = bytes.len(), "导入文件读取完成");

        let document: Value = serde_json::from_slice(&bytes)?;
        parse_document(Path::new(file_path), document)
    }
}

/// 解析导出文档
///
/// # 支持格式
/// - Excalidraw 场景: {"type":"excalidraw","elements":[...],"source":...}
/// - 通用容器: {"id","name","items":[...]}（items 同 Excalidraw 元素结构）
fn parse_document(path: &Path, document: Value) -> ImportResult<PlatformContainer> {
    let Value::Object(mut root) = document else {
        return Err(ImportError::Configuration(
            "导入文件顶层必须是 JSON 对象".to_string(),
        ));
    };

    let file_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    let raw_items = match root.remove("elements").or_else(|| root.remove("items")) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ImportError::Configuration(
                "elements 字段必须是数组".to_string(),
            ))
        }
        None => Vec::new(),
    };

    // 已删除元素（Excalidraw isDeleted）不参与导入
    let items: Vec<NativeItem> = raw_items
        .into_iter()
        .filter(|v| !v.get("isDeleted").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(NativeItem::from_json)
        .collect();

    let take_str = |root: &mut serde_json::Map<String, Value>, key: &str| {
        root.remove(key).and_then(|v| v.as_str().map(str::to_string))
    };

    Ok(PlatformContainer {
        id: take_str(&mut root, "id").unwrap_or_else(|| file_stem.clone()),
        name: take_str(&mut root, "name").unwrap_or(file_stem),
        description: take_str(&mut root, "description"),
        url: take_str(&mut root, "source").or_else(|| take_str(&mut root, "url")),
        owner: take_str(&mut root, "owner"),
        workspace: take_str(&mut root, "workspace"),
        items,
    })
}
