// ==========================================
// 白板导入系统 - 各平台类型映射表
// ==========================================
// 职责: 每个平台一张显式查找表（原生类型 → 规范 kind）
// 约定: 键为规范化后的原生类型名; 未列出的类型一律降级为 Unknown
// ==========================================

use crate::adapter::kind_mapping::{KindRule, KindTable};
use crate::domain::types::{Platform, ShapeType};

// Miro REST v2 item.type
pub static MIRO_KINDS: KindTable = KindTable {
    platform: Platform::Miro,
    entries: &[
        ("text", KindRule::Text),
        ("shape", KindRule::Shape(None)),
        ("sticky_note", KindRule::Sticky),
        ("card", KindRule::Sticky),
        ("app_card", KindRule::Sticky),
        ("connector", KindRule::Arrow),
        ("image", KindRule::Image),
        ("frame", KindRule::Shape(Some(ShapeType::Rectangle))),
    ],
};

// FigJam node.type
pub static FIGJAM_KINDS: KindTable = KindTable {
    platform: Platform::FigJam,
    entries: &[
        ("text", KindRule::Text),
        ("shape_with_text", KindRule::Shape(None)),
        ("rectangle", KindRule::Shape(Some(ShapeType::Rectangle))),
        ("ellipse", KindRule::Shape(Some(ShapeType::Ellipse))),
        ("polygon", KindRule::Shape(Some(ShapeType::Hexagon))),
        ("star", KindRule::Shape(Some(ShapeType::Star))),
        ("sticky", KindRule::Sticky),
        ("connector", KindRule::Arrow),
        ("line", KindRule::Line),
        ("vector", KindRule::Path),
        ("code_block", KindRule::Code),
        ("image", KindRule::Image),
    ],
};

// Lucidchart document item class
pub static LUCIDCHART_KINDS: KindTable = KindTable {
    platform: Platform::Lucidchart,
    entries: &[
        ("text", KindRule::Text),
        ("block", KindRule::Shape(None)),
        ("shape", KindRule::Shape(None)),
        ("sticky_note", KindRule::Sticky),
        ("line", KindRule::Line),
        ("arrow", KindRule::Arrow),
        ("image", KindRule::Image),
        ("code", KindRule::Code),
    ],
};

// Mural widget.type
pub static MURAL_KINDS: KindTable = KindTable {
    platform: Platform::Mural,
    entries: &[
        ("text", KindRule::Text),
        ("sticky_note", KindRule::Sticky),
        ("shape", KindRule::Shape(None)),
        ("area", KindRule::Shape(Some(ShapeType::Rectangle))),
        ("arrow", KindRule::Arrow),
        ("line", KindRule::Line),
        ("drawing", KindRule::Path),
        ("image", KindRule::Image),
    ],
};

// Excalidraw element.type
pub static EXCALIDRAW_KINDS: KindTable = KindTable {
    platform: Platform::Excalidraw,
    entries: &[
        ("text", KindRule::Text),
        ("rectangle", KindRule::Shape(Some(ShapeType::Rectangle))),
        ("ellipse", KindRule::Shape(Some(ShapeType::Ellipse))),
        ("diamond", KindRule::Shape(Some(ShapeType::Diamond))),
        ("frame", KindRule::Shape(Some(ShapeType::Rectangle))),
        ("line", KindRule::Line),
        ("arrow", KindRule::Arrow),
        ("freedraw", KindRule::Path),
        ("image", KindRule::Image),
    ],
};

/// 平台 → 映射表
pub fn kind_table(platform: Platform) -> &'static KindTable {
    match platform {
        Platform::Miro => &MIRO_KINDS,
        Platform::FigJam => &FIGJAM_KINDS,
        Platform::Lucidchart => &LUCIDCHART_KINDS,
        Platform::Mural => &MURAL_KINDS,
        Platform::Excalidraw => &EXCALIDRAW_KINDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_belong_to_their_platform() {
        for platform in Platform::ALL {
            assert_eq!(kind_table(platform).platform, platform);
        }
    }

    #[test]
    fn test_table_keys_are_normalized() {
        for platform in Platform::ALL {
            for (name, _) in kind_table(platform).entries {
                assert_eq!(*name, name.to_lowercase().replace([' ', '-'], "_"));
            }
        }
    }

    #[test]
    fn test_figjam_uppercase_types_resolve() {
        assert_eq!(FIGJAM_KINDS.lookup("SHAPE_WITH_TEXT"), Some(KindRule::Shape(None)));
        assert_eq!(FIGJAM_KINDS.lookup("STAMP"), None);
    }

    #[test]
    fn test_mural_sticky_with_space() {
        assert_eq!(MURAL_KINDS.lookup("sticky note"), Some(KindRule::Sticky));
    }
}
