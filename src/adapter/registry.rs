// ==========================================
// 白板导入系统 - 适配器注册表
// ==========================================
// 职责: 平台 → 适配器实例（只读共享）
// ==========================================

use crate::adapter::adapter_trait::PlatformAdapter;
use crate::domain::types::Platform;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: BTreeMap<Platform, Arc<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册适配器（同平台后注册者覆盖）
    pub fn register(mut self, adapter: Arc<dyn PlatformAdapter>) -> Self {
        self.adapters.insert(adapter.platform(), adapter);
        self
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn PlatformAdapter>> {
        self.adapters.get(&platform).cloned()
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.adapters.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Platform, &Arc<dyn PlatformAdapter>)> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FileSource, MappedAdapter};

    #[test]
    fn test_register_and_lookup() {
        let registry =
            AdapterRegistry::new().register(Arc::new(MappedAdapter::excalidraw(FileSource)));

        assert_eq!(registry.len(), 1);
        assert!(registry.get(Platform::Excalidraw).is_some());
        assert!(registry.get(Platform::Miro).is_none());
        assert_eq!(registry.platforms(), vec![Platform::Excalidraw]);
    }
}
