// ==========================================
// 白板导入系统 - 导入上限配置
// ==========================================
// 职责: 系统级不可变上限（元素数/字节数/超时/重试/退避）
// 红线: 构造时注入管道,运行期只读; 调用方选项只能被钳制,不能突破上限
// ==========================================

use crate::domain::request::{EffectiveOptions, ImportOptions};
use std::time::Duration;
use tracing::warn;

// 环境变量前缀
const ENV_PREFIX: &str = "WHITEBOARD_IMPORT_";

// ==========================================
// ImportLimits - 导入上限
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLimits {
    /// 单快照元素数量上限（默认 10000）
    pub max_elements: usize,
    /// 快照序列化字节数上限（默认 50 MiB）
    pub max_byte_size: usize,
    /// 默认拉取超时（默认 30000ms）
    pub default_timeout_ms: u64,
    /// 拉取超时上限（默认 300000ms）
    pub max_timeout_ms: u64,
    /// 默认尝试次数（默认 3）
    pub default_retry_attempts: u32,
    /// 尝试次数上限（默认 5）
    pub max_retry_attempts: u32,
    /// 退避基数（默认 1000ms）
    pub backoff_base_ms: u64,
    /// 退避封顶（默认 10000ms）
    pub backoff_cap_ms: u64,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_elements: 10_000,
            max_byte_size: 50 * 1024 * 1024,
            default_timeout_ms: 30_000,
            max_timeout_ms: 300_000,
            default_retry_attempts: 3,
            max_retry_attempts: 5,
            backoff_base_ms: 1_000,
            backoff_cap_ms: 10_000,
        }
    }
}

impl ImportLimits {
    /// 从环境变量读取上限（未设置或非法值使用默认）
    ///
    /// # 环境变量
    /// - WHITEBOARD_IMPORT_MAX_ELEMENTS
    /// - WHITEBOARD_IMPORT_MAX_BYTE_SIZE
    /// - WHITEBOARD_IMPORT_DEFAULT_TIMEOUT_MS / WHITEBOARD_IMPORT_MAX_TIMEOUT_MS
    /// - WHITEBOARD_IMPORT_DEFAULT_RETRY_ATTEMPTS / WHITEBOARD_IMPORT_MAX_RETRY_ATTEMPTS
    /// - WHITEBOARD_IMPORT_BACKOFF_BASE_MS / WHITEBOARD_IMPORT_BACKOFF_CAP_MS
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（便于测试注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str, fallback: u64| -> u64 {
            let key = format!("{}{}", ENV_PREFIX, name);
            match lookup(&key) {
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(v) if v > 0 => v,
                    _ => {
                        warn!(key = %key, value = %raw, "上限配置值非法，使用默认值");
                        fallback
                    }
                },
                None => fallback,
            }
        };

        let limits = Self {
            max_elements: read("MAX_ELEMENTS", defaults.max_elements as u64) as usize,
            max_byte_size: read("MAX_BYTE_SIZE", defaults.max_byte_size as u64) as usize,
            default_timeout_ms: read("DEFAULT_TIMEOUT_MS", defaults.default_timeout_ms),
            max_timeout_ms: read("MAX_TIMEOUT_MS", defaults.max_timeout_ms),
            default_retry_attempts: read(
                "DEFAULT_RETRY_ATTEMPTS",
                defaults.default_retry_attempts as u64,
            ) as u32,
            max_retry_attempts: read("MAX_RETRY_ATTEMPTS", defaults.max_retry_attempts as u64)
                as u32,
            backoff_base_ms: read("BACKOFF_BASE_MS", defaults.backoff_base_ms),
            backoff_cap_ms: read("BACKOFF_CAP_MS", defaults.backoff_cap_ms),
        };

        limits.normalized()
    }

    /// 保证默认值不超过上限
    fn normalized(mut self) -> Self {
        self.default_timeout_ms = self.default_timeout_ms.min(self.max_timeout_ms);
        self.default_retry_attempts = self.default_retry_attempts.min(self.max_retry_attempts);
        self
    }

    /// 钳制调用方选项
    ///
    /// # 规则
    /// - 缺省或 0 → 系统默认值
    /// - 超过上限 → 上限（不拒绝）
    pub fn clamp(&self, options: &ImportOptions) -> EffectiveOptions {
        let max_elements = options
            .max_elements
            .filter(|v| *v > 0)
            .map_or(self.max_elements, |v| v.min(self.max_elements));
        let timeout_ms = options
            .timeout_ms
            .filter(|v| *v > 0)
            .map_or(self.default_timeout_ms, |v| v.min(self.max_timeout_ms));
        let retry_attempts = options
            .retry_attempts
            .filter(|v| *v > 0)
            .map_or(self.default_retry_attempts, |v| v.min(self.max_retry_attempts))
            .max(1);

        EffectiveOptions {
            validate_elements: options.validate_elements.unwrap_or(true),
            max_elements,
            timeout_ms,
            retry_attempts,
        }
    }

    /// 第 attempt 次失败后的退避时长: min(base * 2^(attempt-1), cap)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63);
        let delay = self
            .backoff_base_ms
            .saturating_mul(1u64 << exponent)
            .min(self.backoff_cap_ms);
        Duration::from_millis(delay)
    }
}
