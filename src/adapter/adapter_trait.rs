// ==========================================
// 白板导入系统 - 平台适配器 Trait
// ==========================================
// 职责: 定义适配器三方法契约 + 原生容器结构（不包含实现）
// 红线: 管道只依赖 test_connection / fetch_native / convert
// ==========================================

use crate::domain::request::Credentials;
use crate::domain::snapshot::CanonicalSnapshot;
use crate::domain::types::Platform;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

// ==========================================
// PlatformContainer - 平台原生文档
// ==========================================
// 用途: 适配器拉取结果（board / file / document + 子项）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformContainer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub items: Vec<NativeItem>,
}

// ==========================================
// NativeItem - 平台原生子项
// ==========================================
// 坐标缺失时保持 None,转换后以 NaN 表示并由结构校验剔除
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeItem {
    #[serde(default)]
    pub id: Option<String>,
    pub item_type: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub fields: Map<String, Value>, // 其余原生字段
}

impl NativeItem {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: Some(id.into()),
            item_type: item_type.into(),
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// 从任意 JSON 对象构造（id/type/x/y/width/height/angle 提升为显式字段）
    ///
    /// # 返回
    /// - None: 不是 JSON 对象
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let id = fields.remove("id").and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let item_type = fields
            .remove("type")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let mut take_num = |key: &str| fields.remove(key).and_then(|v| v.as_f64());
        let x = take_num("x");
        let y = take_num("y");
        let width = take_num("width");
        let height = take_num("height");
        let rotation = take_num("angle").or_else(|| take_num("rotation"));

        Some(Self {
            id,
            item_type,
            x,
            y,
            width,
            height,
            rotation,
            fields,
        })
    }
}

// ==========================================
// PlatformAdapter Trait
// ==========================================
// 用途: 每个平台一个实现
// 实现者: MappedAdapter<S>
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// 适配器所属平台
    fn platform(&self) -> Platform;

    /// 轻量连通性/鉴权探测
    async fn test_connection(&self) -> bool;

    /// 拉取平台原生文档及其子项
    ///
    /// # 返回
    /// - Ok(PlatformContainer): 原生容器
    /// - Err: 鉴权/权限/不存在/网络错误（人类可读）
    async fn fetch_native(&self, credentials: &Credentials) -> ImportResult<PlatformContainer>;

    /// 原生容器 → 规范快照（纯转换，不会失败）
    fn convert(&self, container: PlatformContainer) -> CanonicalSnapshot;

    /// 拉取并转换（不含重试）
    async fn import_one(&self, credentials: &Credentials) -> ImportResult<CanonicalSnapshot> {
        let container = self.fetch_native(credentials).await?;
        Ok(self.convert(container))
    }
}

// ==========================================
// NativeSource Trait
// ==========================================
// 用途: 平台传输层（HTTP/鉴权/本地文件），由外部注入
// 实现者: FileSource, 测试 Mock
#[async_trait]
pub trait NativeSource: Send + Sync {
    /// 可达性探测
    async fn probe(&self) -> bool;

    /// 按凭证拉取原生容器
    async fn fetch(&self, credentials: &Credentials) -> ImportResult<PlatformContainer>;
}

#[async_trait]
impl<T: NativeSource + ?Sized> NativeSource for Arc<T> {
    async fn probe(&self) -> bool {
        (**self).probe().await
    }

    async fn fetch(&self, credentials: &Credentials) -> ImportResult<PlatformContainer> {
        (**self).fetch(credentials).await
    }
}
