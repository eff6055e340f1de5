// ==========================================
// 白板导入系统 - 领域类型定义
// ==========================================
// 职责: 平台枚举、形状子类型、文本对齐等封闭集合
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 支持平台 (Platform)
// ==========================================
// 红线: 封闭集合,新增平台必须同时补充必填凭证字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Miro,       // Miro 在线白板
    FigJam,     // Figma FigJam
    Lucidchart, // Lucidchart 文档
    Mural,      // Mural 工作区
    Excalidraw, // 本地 Excalidraw 导出文件
}

impl Platform {
    /// 全部支持的平台（顺序固定，用于健康检查输出）
    pub const ALL: [Platform; 5] = [
        Platform::Miro,
        Platform::FigJam,
        Platform::Lucidchart,
        Platform::Mural,
        Platform::Excalidraw,
    ];

    /// 平台必填凭证字段
    ///
    /// # 返回
    /// - 字段名列表（缺失或空白均视为缺失）
    pub fn required_credentials(&self) -> &'static [&'static str] {
        match self {
            Platform::Miro => &["access_token", "board_id"],
            Platform::FigJam => &["access_token", "file_key"],
            Platform::Lucidchart => &["api_key", "document_id"],
            Platform::Mural => &["access_token", "mural_id", "workspace_id"],
            Platform::Excalidraw => &["file_path"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Miro => "miro",
            Platform::FigJam => "fig_jam",
            Platform::Lucidchart => "lucidchart",
            Platform::Mural => "mural",
            Platform::Excalidraw => "excalidraw",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "miro" => Ok(Platform::Miro),
            "fig_jam" | "figjam" => Ok(Platform::FigJam),
            "lucidchart" | "lucid" => Ok(Platform::Lucidchart),
            "mural" => Ok(Platform::Mural),
            "excalidraw" => Ok(Platform::Excalidraw),
            other => Err(format!("不支持的平台: {}", other)),
        }
    }
}

// ==========================================
// 形状子类型 (Shape Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    #[default]
    Rectangle,
    RoundRectangle,
    Ellipse,
    Triangle,
    Diamond,
    Star,
    Hexagon,
    Cloud,
}

impl ShapeType {
    /// 平台原生形状名 → 子类型（未知名称回退为矩形）
    pub fn from_native(name: &str) -> Self {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "round_rectangle" | "rounded_rectangle" | "round_rect" => ShapeType::RoundRectangle,
            "ellipse" | "circle" | "oval" => ShapeType::Ellipse,
            "triangle" => ShapeType::Triangle,
            "diamond" | "rhombus" => ShapeType::Diamond,
            "star" => ShapeType::Star,
            "hexagon" => ShapeType::Hexagon,
            "cloud" => ShapeType::Cloud,
            _ => ShapeType::Rectangle,
        }
    }
}

// ==========================================
// 文本对齐 (Text Align)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn from_native(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "center" | "middle" => TextAlign::Center,
            "right" | "end" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}
