// ==========================================
// 白板导入系统 - 规范元素模型
// ==========================================
// 职责: 平台无关的元素结构 + 各类型默认值
// 红线: 规范元素不允许部分填充,缺失字段一律取类型默认值
// ==========================================

use crate::domain::types::{ShapeType, TextAlign};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ===== 默认样式常量 =====
pub const DEFAULT_FILL_COLOR: &str = "#ffffff";
pub const DEFAULT_STROKE_COLOR: &str = "#1e1e1e";
pub const DEFAULT_TEXT_COLOR: &str = "#1e1e1e";
pub const DEFAULT_STICKY_COLOR: &str = "#fff9b1";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_STICKY_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

// ==========================================
// CanonicalElement - 规范元素
// ==========================================
// 用途: 适配器转换输出,优化器唯一可改写对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalElement {
    pub id: String, // 元素 ID（优化后在快照内唯一）
    pub x: f64,     // 画布坐标 X
    pub y: f64,     // 画布坐标 Y
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64, // 旋转角度（度）

    #[serde(flatten)]
    pub kind: ElementKind,
}

impl CanonicalElement {
    pub fn new(id: impl Into<String>, x: f64, y: f64, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            kind,
        }
    }

    /// 结构校验: id 非空 且 x/y 为有限数值
    ///
    /// 数据校验器与优化器共用同一判定
    pub fn is_structurally_valid(&self) -> bool {
        !self.id.trim().is_empty() && self.x.is_finite() && self.y.is_finite()
    }

    /// 剥离空属性（None / 空字符串 / JSON null）
    pub fn strip_empty(&mut self) {
        self.kind.strip_empty();
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

// ==========================================
// ElementKind - 元素类型（封闭标签联合）
// ==========================================
// 红线: 未知原生类型必须降级为 Unknown,不得中断转换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    Text(TextContent),
    Shape(ShapeContent),
    Sticky(StickyContent),
    Line(ConnectorContent),
    Arrow(ConnectorContent),
    Path(PathContent),
    Image(ImageContent),
    Code(CodeContent),
    Unknown {
        original_type: String,     // 平台原始类型标签
        #[serde(default)]
        raw: Map<String, Value>,   // 原始字段（原样保留）
    },
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Shape(_) => "shape",
            ElementKind::Sticky(_) => "sticky",
            ElementKind::Line(_) => "line",
            ElementKind::Arrow(_) => "arrow",
            ElementKind::Path(_) => "path",
            ElementKind::Image(_) => "image",
            ElementKind::Code(_) => "code",
            ElementKind::Unknown { .. } => "unknown",
        }
    }

    fn strip_empty(&mut self) {
        match self {
            ElementKind::Text(t) => strip_opt(&mut t.link),
            ElementKind::Shape(s) => strip_opt(&mut s.link),
            ElementKind::Sticky(s) => strip_opt(&mut s.author),
            ElementKind::Line(c) | ElementKind::Arrow(c) => {
                strip_opt(&mut c.start_id);
                strip_opt(&mut c.end_id);
                strip_opt(&mut c.label);
            }
            ElementKind::Path(_) => {}
            ElementKind::Image(i) => {
                strip_opt(&mut i.url);
                strip_opt(&mut i.alt_text);
            }
            ElementKind::Code(c) => strip_opt(&mut c.title),
            ElementKind::Unknown { raw, .. } => {
                raw.retain(|_, v| !is_empty_value(v));
            }
        }
    }
}

fn strip_opt(value: &mut Option<String>) {
    if value.as_deref().is_some_and(str::is_empty) {
        *value = None;
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

// ==========================================
// 各类型内容结构（含默认值）
// ==========================================

/// 二维点（连线/路径顶点，相对元素原点）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// 文本
///
/// 默认: 字号 16, 字体 sans-serif, 颜色 #1e1e1e, 左对齐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
    pub align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            align: TextAlign::Left,
            link: None,
        }
    }
}

/// 形状
///
/// 默认: 矩形, 填充 #ffffff, 描边 #1e1e1e, 线宽 2.0, 不透明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeContent {
    pub shape: ShapeType,
    pub text: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Default for ShapeContent {
    fn default() -> Self {
        Self {
            shape: ShapeType::Rectangle,
            text: String::new(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
            link: None,
        }
    }
}

/// 便利贴
///
/// 默认: 黄色 #fff9b1, 字号 14
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyContent {
    pub text: String,
    pub fill_color: String,
    pub font_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for StickyContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            fill_color: DEFAULT_STICKY_COLOR.to_string(),
            font_size: DEFAULT_STICKY_FONT_SIZE,
            author: None,
        }
    }
}

/// 连线（Line / Arrow 共用）
///
/// 默认: 描边 #1e1e1e, 线宽 2.0, 实线, 无箭头
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorContent {
    pub points: Vec<Point>,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub dashed: bool,
    pub start_arrowhead: bool,
    pub end_arrowhead: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for ConnectorContent {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            dashed: false,
            start_arrowhead: false,
            end_arrowhead: false,
            start_id: None,
            end_id: None,
            label: None,
        }
    }
}

impl ConnectorContent {
    /// 箭头默认值: 终点带箭头
    pub fn arrow() -> Self {
        Self {
            end_arrowhead: true,
            ..Self::default()
        }
    }
}

/// 自由路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathContent {
    pub points: Vec<Point>,
    pub stroke_color: String,
    pub stroke_width: f64,
}

impl Default for PathContent {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// 图片（来源地址可能缺失）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// 代码块
///
/// 默认: 语言 plaintext
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeContent {
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for CodeContent {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: DEFAULT_CODE_LANGUAGE.to_string(),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_validity() {
        let ok = CanonicalElement::new("a", 1.0, 2.0, ElementKind::Text(TextContent::default()));
        assert!(ok.is_structurally_valid());

        let no_id = CanonicalElement::new("  ", 1.0, 2.0, ElementKind::Text(TextContent::default()));
        assert!(!no_id.is_structurally_valid());

        let nan = CanonicalElement::new("b", f64::NAN, 2.0, ElementKind::Text(TextContent::default()));
        assert!(!nan.is_structurally_valid());
    }

    #[test]
    fn test_strip_empty_unknown_raw() {
        let mut raw = Map::new();
        raw.insert("keep".to_string(), json!(1));
        raw.insert("blank".to_string(), json!(""));
        raw.insert("null".to_string(), Value::Null);
        let mut element = CanonicalElement::new(
            "u",
            0.0,
            0.0,
            ElementKind::Unknown {
                original_type: "mind_map".to_string(),
                raw,
            },
        );

        element.strip_empty();

        match element.kind {
            ElementKind::Unknown { raw, .. } => {
                assert_eq!(raw.len(), 1);
                assert!(raw.contains_key("keep"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_serialized_shape_carries_kind_tag() {
        let element = CanonicalElement::new("s", 0.0, 0.0, ElementKind::Shape(ShapeContent::default()));
        let value = serde_json::to_value(&element).unwrap();

        assert_eq!(value["kind"], "shape");
        assert_eq!(value["fill_color"], DEFAULT_FILL_COLOR);
        assert!(value.get("link").is_none());
    }
}
