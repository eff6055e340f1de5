// ==========================================
// 白板导入系统 - 导入请求解析
// ==========================================
// 职责: 外部 JSON 批量输入 → ImportRequest（逐条解析）
// 红线: 单条解析失败只影响该条结果,不影响同批其他请求
// ==========================================

use crate::domain::request::ImportRequest;
use crate::domain::result::{ProcessingMetadata, ProcessingResult};
use crate::domain::types::Platform;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_pipeline_trait::ImportPipeline;
use serde_json::Value;
use tracing::{info, warn};

/// 解析单条导入请求
///
/// # 规则
/// - 顶层必须是 JSON 对象
/// - platform 必须是受支持的平台名（大小写不敏感，规整为标准名）
/// - 其余字段格式错误 → 配置错误
pub fn parse_request(entry: Value) -> ImportResult<ImportRequest> {
    let Value::Object(mut fields) = entry else {
        return Err(ImportError::Configuration(
            "导入请求必须是 JSON 对象".to_string(),
        ));
    };

    let platform = match fields.get("platform") {
        Some(Value::String(tag)) => tag.parse::<Platform>().map_err(ImportError::Configuration)?,
        Some(_) => {
            return Err(ImportError::Configuration(
                "platform 字段必须是字符串".to_string(),
            ))
        }
        None => return Err(ImportError::Configuration("缺少 platform 字段".to_string())),
    };
    fields.insert(
        "platform".to_string(),
        Value::String(platform.as_str().to_string()),
    );

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ImportError::Configuration(format!("导入请求格式错误: {}", e)))
}

/// 从原始 JSON 条目中尽量识别平台（用于失败结果的元数据）
fn platform_hint(entry: &Value) -> Option<Platform> {
    entry
        .get("platform")
        .and_then(Value::as_str)
        .and_then(|tag| tag.parse().ok())
}

/// 批量导入原始 JSON 条目
///
/// # 返回
/// - Vec<ProcessingResult>: 与输入顺序一一对应
///
/// # 说明
/// - 解析失败的条目直接记为失败结果
/// - 解析成功的条目交由 process_batch 并发执行，结果按原索引回填
pub async fn process_json_batch(
    pipeline: &dyn ImportPipeline,
    entries: Vec<Value>,
) -> Vec<ProcessingResult> {
    let total = entries.len();
    let mut slots: Vec<Option<ProcessingResult>> = Vec::with_capacity(total);
    let mut positions = Vec::new();
    let mut requests = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let platform = platform_hint(&entry);
        match parse_request(entry) {
            Ok(request) => {
                positions.push(index);
                requests.push(request);
                slots.push(None);
            }
            Err(e) => {
                warn!(index, error = %e, "导入请求解析失败");
                let metadata = platform.map(|p| ProcessingMetadata::new(p, 0));
                slots.push(Some(ProcessingResult::failed(
                    e.to_string(),
                    Vec::new(),
                    metadata,
                )));
            }
        }
    }

    info!(total, parsed = requests.len(), "导入请求解析完成");

    let results = pipeline.process_batch(requests).await;
    for (index, result) in positions.into_iter().zip(results) {
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                ProcessingResult::failed(
                    ImportError::Internal("批量结果缺失".to_string()).to_string(),
                    Vec::new(),
                    None,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_normalizes_platform_name() {
        let request = parse_request(json!({
            "platform": "FigJam",
            "credentials": {"access_token": "t", "file_key": "k"}
        }))
        .unwrap();

        assert_eq!(request.platform, Platform::FigJam);
        assert_eq!(request.credentials.unwrap().get("file_key"), Some("k"));
    }

    #[test]
    fn test_parse_rejects_unsupported_platform() {
        let err = parse_request(json!({"platform": "trello"})).unwrap_err();

        assert!(matches!(err, ImportError::Configuration(_)));
        assert!(err.to_string().contains("不支持的平台: trello"));
    }

    #[test]
    fn test_parse_rejects_malformed_fields() {
        let err = parse_request(json!({
            "platform": "miro",
            "options": {"timeout_ms": "soon"}
        }))
        .unwrap_err();

        assert!(err.to_string().contains("导入请求格式错误"));
    }

    #[test]
    fn test_parse_rejects_non_object_and_missing_platform() {
        assert!(parse_request(json!(["miro"])).is_err());
        assert!(parse_request(json!({"credentials": {}}))
            .unwrap_err()
            .to_string()
            .contains("缺少 platform"));
    }
}
