// ==========================================
// 白板导入系统 - 请求配置校验器实现
// ==========================================
// 职责: 网络访问前校验平台/凭证/选项
// 红线: 纯函数,无副作用,不做网络 I/O
// ==========================================

use crate::config::ImportLimits;
use crate::domain::request::ImportRequest;
use crate::domain::result::ValidationResult;
use crate::domain::types::Platform;
use crate::importer::import_pipeline_trait::RequestValidator;
use std::collections::BTreeSet;

pub struct ConfigValidator {
    limits: ImportLimits,
    supported: BTreeSet<Platform>, // 当前部署支持的平台
}

impl ConfigValidator {
    /// 支持全部平台
    pub fn new(limits: ImportLimits) -> Self {
        Self::with_platforms(limits, Platform::ALL)
    }

    /// 仅支持指定平台
    pub fn with_platforms(
        limits: ImportLimits,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> Self {
        Self {
            limits,
            supported: platforms.into_iter().collect(),
        }
    }
}

impl RequestValidator for ConfigValidator {
    fn validate(&self, request: &ImportRequest) -> ValidationResult {
        let mut result = ValidationResult::valid();

        // 平台校验
        if !self.supported.contains(&request.platform) {
            result.error(format!("不支持的平台: {}", request.platform));
        }

        // 凭证校验
        match &request.credentials {
            None => result.error("缺少凭证"),
            Some(credentials) => {
                let missing = credentials.missing_fields(request.platform.required_credentials());
                if !missing.is_empty() {
                    result.error(format!(
                        "{} 凭证缺少必填字段: {}",
                        request.platform,
                        missing.join(", ")
                    ));
                }
            }
        }

        // 选项上限（警告，使用时按上限钳制）
        let options = &request.options;
        if let Some(max_elements) = options.max_elements {
            if max_elements > self.limits.max_elements {
                result.warn(format!(
                    "max_elements {} 超过系统上限，按 {} 处理",
                    max_elements, self.limits.max_elements
                ));
            }
        }
        if let Some(timeout_ms) = options.timeout_ms {
            if timeout_ms > self.limits.max_timeout_ms {
                result.warn(format!(
                    "timeout_ms {} 超过系统上限，按 {} 处理",
                    timeout_ms, self.limits.max_timeout_ms
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{Credentials, ImportOptions};

    fn miro_credentials() -> Credentials {
        Credentials::new()
            .with("access_token", "token")
            .with("board_id", "uXjVO")
    }

    #[test]
    fn test_valid_request() {
        let validator = ConfigValidator::new(ImportLimits::default());
        let result = validator.validate(&ImportRequest::new(Platform::Miro, miro_credentials()));

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_credentials() {
        let validator = ConfigValidator::new(ImportLimits::default());
        let request = ImportRequest {
            platform: Platform::Miro,
            credentials: None,
            options: ImportOptions::default(),
        };

        let result = validator.validate(&request);

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["缺少凭证".to_string()]);
    }

    #[test]
    fn test_missing_platform_specific_field() {
        let validator = ConfigValidator::new(ImportLimits::default());
        let credentials = Credentials::new().with("access_token", "token");

        let result = validator.validate(&ImportRequest::new(Platform::Mural, credentials));

        assert!(!result.is_valid);
        assert!(result.errors[0].contains("mural_id"));
        assert!(result.errors[0].contains("workspace_id"));
        assert!(!result.errors[0].contains("access_token"));
    }

    #[test]
    fn test_unsupported_platform() {
        let validator =
            ConfigValidator::with_platforms(ImportLimits::default(), [Platform::Excalidraw]);

        let result = validator.validate(&ImportRequest::new(Platform::Miro, miro_credentials()));

        assert!(!result.is_valid);
        assert!(result.errors[0].contains("不支持的平台"));
    }

    #[test]
    fn test_ceiling_overrides_are_warnings() {
        let validator = ConfigValidator::new(ImportLimits::default());
        let request = ImportRequest::new(Platform::Miro, miro_credentials()).with_options(
            ImportOptions {
                max_elements: Some(20_000),
                timeout_ms: Some(600_000),
                ..ImportOptions::default()
            },
        );

        let result = validator.validate(&request);

        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
    }
}
