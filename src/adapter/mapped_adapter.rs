// ==========================================
// 白板导入系统 - 映射适配器实现
// ==========================================
// 职责: 平台 + 映射表 + 传输源 → 完整 PlatformAdapter
// 流程: 探测 → 拉取（委托 NativeSource）→ 逐项查表转换
// ==========================================

use crate::adapter::adapter_trait::{NativeSource, PlatformAdapter, PlatformContainer};
use crate::adapter::kind_mapping::KindTable;
use crate::adapter::platforms::kind_table;
use crate::domain::request::Credentials;
use crate::domain::snapshot::{CanonicalSnapshot, SnapshotMetadata};
use crate::domain::types::Platform;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

// ==========================================
// MappedAdapter - 查表式平台适配器
// ==========================================
pub struct MappedAdapter<S>
where
    S: NativeSource,
{
    platform: Platform,
    table: &'static KindTable,
    source: S,
}

impl<S> MappedAdapter<S>
where
    S: NativeSource,
{
    /// 使用平台默认映射表创建
    pub fn new(platform: Platform, source: S) -> Self {
        Self {
            platform,
            table: kind_table(platform),
            source,
        }
    }

    pub fn miro(source: S) -> Self {
        Self::new(Platform::Miro, source)
    }

    pub fn figjam(source: S) -> Self {
        Self::new(Platform::FigJam, source)
    }

    pub fn lucidchart(source: S) -> Self {
        Self::new(Platform::Lucidchart, source)
    }

    pub fn mural(source: S) -> Self {
        Self::new(Platform::Mural, source)
    }

    pub fn excalidraw(source: S) -> Self {
        Self::new(Platform::Excalidraw, source)
    }
}

#[async_trait]
impl<S> PlatformAdapter for MappedAdapter<S>
where
    S: NativeSource,
{
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn test_connection(&self) -> bool {
        self.source.probe().await
    }

    async fn fetch_native(&self, credentials: &Credentials) -> ImportResult<PlatformContainer> {
        self.source.fetch(credentials).await
    }

    fn convert(&self, container: PlatformContainer) -> CanonicalSnapshot {
        let item_count = container.items.len();
        let elements: Vec<_> = container
            .items
            .into_iter()
            .map(|item| self.table.convert_item(item))
            .collect();

        let unknown = elements.iter().filter(|e| e.kind_name() == "unknown").count();
        debug!(
            platform = %self.platform,
            items = item_count,
            unknown = unknown,
            "原生子项转换完成"
        );

        let id = if container.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            container.id
        };

        CanonicalSnapshot {
            id,
            name: container.name,
            description: container.description,
            elements,
            metadata: SnapshotMetadata {
                origin_url: container.url,
                owner: container.owner,
                workspace: container.workspace,
                ..SnapshotMetadata::new(self.platform)
            },
        }
    }
}
