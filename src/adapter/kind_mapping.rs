// ==========================================
// 白板导入系统 - 原生类型映射表
// ==========================================
// 职责: 原生类型 → 规范 kind 的封闭查找表 + 按 kind 填充默认值
// 红线: 查不到的类型降级为 Unknown,保留原始类型标签与原始字段
// ==========================================

use crate::adapter::adapter_trait::NativeItem;
use crate::domain::element::{
    CanonicalElement, CodeContent, ConnectorContent, ElementKind, ImageContent, PathContent,
    Point, ShapeContent, StickyContent, TextContent,
};
use crate::domain::types::{Platform, ShapeType, TextAlign};
use serde_json::{Map, Value};

// ==========================================
// KindRule - 映射规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindRule {
    Text,
    /// 形状; None 表示子类型取自原生 shape 字段
    Shape(Option<ShapeType>),
    Sticky,
    Line,
    Arrow,
    Path,
    Image,
    Code,
}

// ==========================================
// KindTable - 平台映射表
// ==========================================
// 键为规范化后的原生类型（小写,空格/连字符 → 下划线）
#[derive(Debug)]
pub struct KindTable {
    pub platform: Platform,
    pub entries: &'static [(&'static str, KindRule)],
}

impl KindTable {
    pub fn lookup(&self, native_type: &str) -> Option<KindRule> {
        let key = normalize_type(native_type);
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, rule)| *rule)
    }

    /// 原生子项 → 规范元素
    ///
    /// 坐标缺失记为 NaN（结构校验判为无效）; id 缺失记为空串
    pub fn convert_item(&self, item: NativeItem) -> CanonicalElement {
        let kind = match self.lookup(&item.item_type) {
            Some(rule) => build_kind(rule, &item.fields),
            None => ElementKind::Unknown {
                original_type: item.item_type.clone(),
                raw: item.fields.clone(),
            },
        };

        CanonicalElement {
            id: item.id.unwrap_or_default(),
            x: item.x.unwrap_or(f64::NAN),
            y: item.y.unwrap_or(f64::NAN),
            width: item.width.unwrap_or(0.0),
            height: item.height.unwrap_or(0.0),
            rotation: item.rotation.unwrap_or(0.0),
            kind,
        }
    }
}

fn normalize_type(native_type: &str) -> String {
    native_type.trim().to_lowercase().replace([' ', '-'], "_")
}

// ==========================================
// 字段别名（各平台命名不一）
// ==========================================
const TEXT_KEYS: &[&str] = &["text", "content", "plain_text", "plainText", "title"];
const FILL_KEYS: &[&str] = &["fill_color", "fillColor", "backgroundColor", "background_color", "fill"];
const STROKE_KEYS: &[&str] = &["stroke_color", "strokeColor", "borderColor", "border_color"];
const STROKE_WIDTH_KEYS: &[&str] = &["stroke_width", "strokeWidth", "borderWidth", "border_width"];
const FONT_SIZE_KEYS: &[&str] = &["font_size", "fontSize"];
const FONT_FAMILY_KEYS: &[&str] = &["font_family", "fontFamily"];
const COLOR_KEYS: &[&str] = &["color", "textColor", "text_color"];
const ALIGN_KEYS: &[&str] = &["align", "textAlign", "text_align"];
const LINK_KEYS: &[&str] = &["link", "href"];
const SHAPE_KEYS: &[&str] = &["shape", "shape_type", "shapeType"];

fn str_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match fields.get(*k) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn num_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|k| fields.get(*k).and_then(Value::as_f64))
        .filter(|v| v.is_finite())
}

/// 布尔或非空标记（如 Excalidraw 的 "arrow" 箭头名）均视为 true
fn flag_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| match fields.get(*k) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => Some(!s.is_empty() && s != "none"),
        Some(Value::Null) => Some(false),
        _ => None,
    })
}

/// 顶点: [[x, y], ...] 或 [{"x":..,"y":..}, ...]
fn points_field(fields: &Map<String, Value>) -> Vec<Point> {
    let Some(Value::Array(raw)) = fields.get("points") else {
        return Vec::new();
    };
    raw.iter()
        .filter_map(|p| match p {
            Value::Array(pair) if pair.len() >= 2 => Some(Point {
                x: pair[0].as_f64()?,
                y: pair[1].as_f64()?,
            }),
            Value::Object(obj) => Some(Point {
                x: obj.get("x")?.as_f64()?,
                y: obj.get("y")?.as_f64()?,
            }),
            _ => None,
        })
        .collect()
}

fn build_kind(rule: KindRule, fields: &Map<String, Value>) -> ElementKind {
    match rule {
        KindRule::Text => ElementKind::Text(text_content(fields)),
        KindRule::Shape(fixed) => ElementKind::Shape(shape_content(fields, fixed)),
        KindRule::Sticky => ElementKind::Sticky(sticky_content(fields)),
        KindRule::Line => ElementKind::Line(connector_content(fields, ConnectorContent::default())),
        KindRule::Arrow => ElementKind::Arrow(connector_content(fields, ConnectorContent::arrow())),
        KindRule::Path => ElementKind::Path(path_content(fields)),
        KindRule::Image => ElementKind::Image(image_content(fields)),
        KindRule::Code => ElementKind::Code(code_content(fields)),
    }
}

fn text_content(fields: &Map<String, Value>) -> TextContent {
    let defaults = TextContent::default();
    TextContent {
        text: str_field(fields, TEXT_KEYS).unwrap_or(defaults.text),
        font_size: num_field(fields, FONT_SIZE_KEYS).unwrap_or(defaults.font_size),
        font_family: str_field(fields, FONT_FAMILY_KEYS).unwrap_or(defaults.font_family),
        color: str_field(fields, COLOR_KEYS)
            .or_else(|| str_field(fields, STROKE_KEYS))
            .unwrap_or(defaults.color),
        align: str_field(fields, ALIGN_KEYS)
            .map(|a| TextAlign::from_native(&a))
            .unwrap_or(defaults.align),
        link: str_field(fields, LINK_KEYS),
    }
}

fn shape_content(fields: &Map<String, Value>, fixed: Option<ShapeType>) -> ShapeContent {
    let defaults = ShapeContent::default();
    let shape = fixed.unwrap_or_else(|| {
        str_field(fields, SHAPE_KEYS)
            .map(|s| ShapeType::from_native(&s))
            .unwrap_or(defaults.shape)
    });
    // 透明度: 0-1 或 0-100 两种口径
    let opacity = num_field(fields, &["opacity", "fillOpacity", "fill_opacity"])
        .map(|o| if o > 1.0 { o / 100.0 } else { o })
        .map(|o| o.clamp(0.0, 1.0))
        .unwrap_or(defaults.opacity);

    ShapeContent {
        shape,
        text: str_field(fields, TEXT_KEYS).unwrap_or(defaults.text),
        fill_color: str_field(fields, FILL_KEYS).unwrap_or(defaults.fill_color),
        stroke_color: str_field(fields, STROKE_KEYS).unwrap_or(defaults.stroke_color),
        stroke_width: num_field(fields, STROKE_WIDTH_KEYS).unwrap_or(defaults.stroke_width),
        opacity,
        link: str_field(fields, LINK_KEYS),
    }
}

fn sticky_content(fields: &Map<String, Value>) -> StickyContent {
    let defaults = StickyContent::default();
    StickyContent {
        text: str_field(fields, TEXT_KEYS).unwrap_or(defaults.text),
        fill_color: str_field(fields, FILL_KEYS).unwrap_or(defaults.fill_color),
        font_size: num_field(fields, FONT_SIZE_KEYS).unwrap_or(defaults.font_size),
        author: str_field(fields, &["author", "createdBy", "created_by"]),
    }
}

fn connector_content(fields: &Map<String, Value>, defaults: ConnectorContent) -> ConnectorContent {
    let dashed = flag_field(fields, &["dashed"]).unwrap_or_else(|| {
        str_field(fields, &["strokeStyle", "stroke_style"])
            .map(|s| s == "dashed" || s == "dotted")
            .unwrap_or(defaults.dashed)
    });

    ConnectorContent {
        points: points_field(fields),
        stroke_color: str_field(fields, STROKE_KEYS).unwrap_or(defaults.stroke_color),
        stroke_width: num_field(fields, STROKE_WIDTH_KEYS).unwrap_or(defaults.stroke_width),
        dashed,
        start_arrowhead: flag_field(fields, &["start_arrowhead", "startArrowhead"])
            .unwrap_or(defaults.start_arrowhead),
        end_arrowhead: flag_field(fields, &["end_arrowhead", "endArrowhead"])
            .unwrap_or(defaults.end_arrowhead),
        start_id: str_field(fields, &["start_id", "startId", "start_item_id", "startItemId"]),
        end_id: str_field(fields, &["end_id", "endId", "end_item_id", "endItemId"]),
        label: str_field(fields, &["label", "caption"]),
    }
}

fn path_content(fields: &Map<String, Value>) -> PathContent {
    let defaults = PathContent::default();
    PathContent {
        points: points_field(fields),
        stroke_color: str_field(fields, STROKE_KEYS).unwrap_or(defaults.stroke_color),
        stroke_width: num_field(fields, STROKE_WIDTH_KEYS).unwrap_or(defaults.stroke_width),
    }
}

fn image_content(fields: &Map<String, Value>) -> ImageContent {
    ImageContent {
        url: str_field(fields, &["url", "image_url", "imageUrl", "src", "fileId"]),
        alt_text: str_field(fields, &["alt_text", "altText", "alt", "title"]),
    }
}

fn code_content(fields: &Map<String, Value>) -> CodeContent {
    let defaults = CodeContent::default();
    CodeContent {
        code: str_field(fields, &["code", "text", "content"]).unwrap_or(defaults.code),
        language: str_field(fields, &["language", "lang", "codeLanguage"])
            .unwrap_or(defaults.language),
        title: str_field(fields, &["title"]),
    }
}
