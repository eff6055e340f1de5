// ==========================================
// 白板导入系统 - 导入请求模型
// ==========================================
// 职责: 用户一次导入操作的输入
// 红线: 请求构造后不可变,不落库; options 使用前必须经过上限钳制
// ==========================================

use crate::domain::types::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Credentials - 平台凭证（不透明）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// 读取字段（空白值视为缺失）
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// 返回缺失的必填字段
    pub fn missing_fields<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|field| self.get(field).is_none())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ==========================================
// ImportOptions - 调用方选项（未钳制）
// ==========================================
// 缺省字段: None 表示使用系统默认值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub validate_elements: Option<bool>, // 是否逐元素结构校验（默认 true）
    pub max_elements: Option<usize>,     // 元素数量上限
    pub timeout_ms: Option<u64>,         // 单次拉取超时（毫秒）
    pub retry_attempts: Option<u32>,     // 最大尝试次数
}

// ==========================================
// ImportRequest - 导入请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub platform: Platform,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub options: ImportOptions,
}

impl ImportRequest {
    pub fn new(platform: Platform, credentials: Credentials) -> Self {
        Self {
            platform,
            credentials: Some(credentials),
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }
}

// ==========================================
// EffectiveOptions - 钳制后的选项
// ==========================================
// 由 ImportLimits::clamp 生成,下游只使用此结构
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub validate_elements: bool,
    pub max_elements: usize,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_treats_blank_as_missing() {
        let creds = Credentials::new()
            .with("access_token", "tok")
            .with("board_id", "   ");

        assert_eq!(
            creds.missing_fields(&["access_token", "board_id"]),
            vec!["board_id"]
        );
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: ImportRequest =
            serde_json::from_str(r#"{"platform":"miro"}"#).unwrap();

        assert_eq!(request.platform, Platform::Miro);
        assert!(request.credentials.is_none());
        assert_eq!(request.options, ImportOptions::default());
    }
}
