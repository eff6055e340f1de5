// ==========================================
// 白板导入系统 - 重试编排器
// ==========================================
// 职责: 驱动一次适配器拉取（超时竞速 + 封顶指数退避）
// 挂起点: 适配器拉取 / 超时计时 / 退避休眠
// ==========================================

use crate::adapter::{PlatformAdapter, PlatformContainer};
use crate::config::ImportLimits;
use crate::domain::request::{Credentials, EffectiveOptions};
use crate::importer::error::{ImportError, ImportResult};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

pub struct RetryOrchestrator {
    limits: ImportLimits,
}

impl RetryOrchestrator {
    pub fn new(limits: ImportLimits) -> Self {
        Self { limits }
    }

    /// 带重试的原生数据拉取
    ///
    /// # 流程
    /// 1. 第 attempt 次: fetch_native 与 timeout_ms 计时竞速
    /// 2. 计时先到 → 丢弃拉取 future（在下一挂起点取消），记为超时
    /// 3. 可重试错误且仍有次数 → 休眠 min(base * 2^(attempt-1), cap) 后重试
    /// 4. 次数用尽 → RetriesExhausted（包裹最后一次错误）
    ///
    /// # 返回
    /// - Ok(PlatformContainer): 某次拉取成功
    /// - Err: 不可重试错误立即返回; 可重试错误耗尽后返回 RetriesExhausted
    #[instrument(skip_all, fields(platform = %adapter.platform(), attempts = options.retry_attempts))]
    pub async fn run_with_retry(
        &self,
        adapter: &dyn PlatformAdapter,
        credentials: &Credentials,
        options: &EffectiveOptions,
    ) -> ImportResult<PlatformContainer> {
        let max_attempts = options.retry_attempts.max(1);
        let timeout = Duration::from_millis(options.timeout_ms);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, timeout_ms = options.timeout_ms, "开始拉取平台数据");

            let err = match tokio::time::timeout(timeout, adapter.fetch_native(credentials)).await
            {
                Ok(Ok(container)) => {
                    debug!(attempt, items = container.items.len(), "平台数据拉取成功");
                    return Ok(container);
                }
                Ok(Err(e)) => e,
                Err(_elapsed) => ImportError::Timeout {
                    timeout_ms: options.timeout_ms,
                },
            };

            if !err.is_retryable() {
                error!(attempt, error = %err, "不可重试错误，终止拉取");
                return Err(err);
            }

            if attempt >= max_attempts {
                error!(attempt, max_attempts, error = %err, "重试次数耗尽");
                return Err(ImportError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            let delay = self.limits.backoff_delay(attempt);
            warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "拉取失败，等待后重试"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{MappedAdapter, NativeSource};
    use crate::domain::types::Platform;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// 前 fail_times 次返回传输错误，之后成功
    struct FlakySource {
        fail_times: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl NativeSource for FlakySource {
        async fn probe(&self) -> bool {
            true
        }

        async fn fetch(&self, _credentials: &Credentials) -> ImportResult<PlatformContainer> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.fail_times {
                Err(ImportError::transport(Platform::Miro, "503 Service Unavailable"))
            } else {
                Ok(PlatformContainer::default())
            }
        }
    }

    fn options(retry_attempts: u32) -> EffectiveOptions {
        EffectiveOptions {
            validate_elements: true,
            max_elements: 100,
            timeout_ms: 1_000,
            retry_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let source = Arc::new(FlakySource {
            fail_times: 2,
            calls: AtomicU32::new(0),
        });
        let adapter = MappedAdapter::miro(source.clone());
        let orchestrator = RetryOrchestrator::new(ImportLimits::default());

        let start = tokio::time::Instant::now();
        let result = orchestrator
            .run_with_retry(&adapter, &Credentials::new(), &options(3))
            .await;

        assert!(result.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        // 1000ms + 2000ms 退避
        assert!(start.elapsed() >= Duration::from_millis(3_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_wraps_last_error() {
        let source = Arc::new(FlakySource {
            fail_times: 10,
            calls: AtomicU32::new(0),
        });
        let adapter = MappedAdapter::miro(source.clone());
        let orchestrator = RetryOrchestrator::new(ImportLimits::default());

        let result = orchestrator
            .run_with_retry(&adapter, &Credentials::new(), &options(2))
            .await;

        match result {
            Err(ImportError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, ImportError::Transport { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    struct RejectingSource;

    #[async_trait]
    impl NativeSource for RejectingSource {
        async fn probe(&self) -> bool {
            false
        }

        async fn fetch(&self, _credentials: &Credentials) -> ImportResult<PlatformContainer> {
            Err(ImportError::Configuration("board not found".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_fails_immediately() {
        let adapter = MappedAdapter::miro(RejectingSource);
        let orchestrator = RetryOrchestrator::new(ImportLimits::default());

        let start = tokio::time::Instant::now();
        let result = orchestrator
            .run_with_retry(&adapter, &Credentials::new(), &options(3))
            .await;

        assert!(matches!(result, Err(ImportError::Configuration(_))));
        assert!(start.elapsed() < Duration::from_millis(1_000));
    }
}
