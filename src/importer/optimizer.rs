// ==========================================
// 白板导入系统 - 快照优化器实现
// ==========================================
// 职责: 确定性清洗/去重/排序,生成新快照
// 步骤: 剔除无效 → 按 id 去重（保留首个）→ 坐标两位小数 → 剥离空属性 → 按 (y, x) 排序
// 红线: 步骤顺序固定; 纯函数,不会失败; 幂等
// ==========================================

use crate::domain::element::CanonicalElement;
use crate::domain::snapshot::CanonicalSnapshot;
use crate::importer::import_pipeline_trait::{
    OptimizationStats, OptimizedSnapshot, SnapshotOptimizer,
};
use std::collections::HashSet;

pub struct Optimizer;

impl SnapshotOptimizer for Optimizer {
    fn optimize(&self, snapshot: &CanonicalSnapshot) -> OptimizedSnapshot {
        let original_element_count = snapshot.elements.len();

        // 步骤 1: 剔除结构无效元素（与数据校验器同一判定）
        let valid: Vec<&CanonicalElement> = snapshot
            .elements
            .iter()
            .filter(|e| e.is_structurally_valid())
            .collect();
        let dropped_invalid = original_element_count - valid.len();

        // 步骤 2: 按 id 去重，保留原始顺序中的首个
        let mut seen_ids = HashSet::new();
        let unique: Vec<&CanonicalElement> = valid
            .into_iter()
            .filter(|e| seen_ids.insert(e.id.as_str()))
            .collect();
        let dropped_duplicates = original_element_count - dropped_invalid - unique.len();

        // 步骤 3-4: 坐标取两位小数 + 剥离空属性
        let mut elements: Vec<CanonicalElement> = unique
            .into_iter()
            .map(|e| {
                let mut element = e.clone();
                element.x = round2(element.x);
                element.y = round2(element.y);
                element.strip_empty();
                element
            })
            .collect();

        // 步骤 5: 按 y 升序、x 升序稳定排序
        elements.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let final_element_count = elements.len();

        OptimizedSnapshot {
            snapshot: CanonicalSnapshot {
                id: snapshot.id.clone(),
                name: snapshot.name.clone(),
                description: snapshot.description.clone(),
                elements,
                metadata: snapshot.metadata.clone(),
            },
            stats: OptimizationStats {
                original_element_count,
                final_element_count,
                dropped_invalid,
                dropped_duplicates,
            },
        }
    }
}

// 超过该量级的 f64 已无两位小数可舍入，原样保留
const ROUNDING_LIMIT: f64 = 4_503_599_627_370_496.0 / 100.0;

/// 四舍五入到两位小数（半数远离零）
///
/// 按最短十进制表示逐位舍入，使 1.005 → 1.01、10.075 → 10.08;
/// 非有限值或超大值原样返回，结果不会从有限变为无穷
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= ROUNDING_LIMIT {
        return value;
    }

    // f64 的 Display 输出最短可回读表示，且不使用科学计数法
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if frac_part.len() <= 2 {
        return normalize_zero(value);
    }

    let digits = frac_part.as_bytes();
    let int_value: i64 = int_part.parse().unwrap_or(0);
    let mut scaled =
        int_value * 100 + i64::from(digits[0] - b'0') * 10 + i64::from(digits[1] - b'0');
    if digits[2] >= b'5' {
        scaled += 1;
    }

    normalize_zero((scaled as f64 / 100.0).copysign(value))
}

/// 消除 -0.0，保证排序与序列化稳定
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
