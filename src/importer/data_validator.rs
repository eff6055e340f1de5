// ==========================================
// 白板导入系统 - 快照数据校验器实现
// ==========================================
// 职责: 拉取+转换结果的数量/体积/结构校验
// 顺序: 数量 → 体积 → 逐元素结构（顺序固定）
// 策略: 整体越界硬失败; 部分元素无效仅警告,由优化器剔除
// ==========================================

use crate::config::ImportLimits;
use crate::domain::request::EffectiveOptions;
use crate::domain::result::ValidationResult;
use crate::domain::snapshot::CanonicalSnapshot;
use crate::importer::import_pipeline_trait::SnapshotValidator;

pub struct DataValidator {
    max_byte_size: usize, // 快照序列化字节上限
}

impl DataValidator {
    pub fn new(limits: &ImportLimits) -> Self {
        Self {
            max_byte_size: limits.max_byte_size,
        }
    }
}

impl SnapshotValidator for DataValidator {
    fn validate(
        &self,
        snapshot: &CanonicalSnapshot,
        options: &EffectiveOptions,
    ) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let count = snapshot.elements.len();
        result.element_count = count;

        // 数量校验
        if count == 0 {
            result.warn("空导入: 快照不含任何元素");
        } else if count > options.max_elements {
            // 整个快照拒绝，不做部分接收
            result.error(format!(
                "元素数量超限: {} > {}",
                count, options.max_elements
            ));
            return result;
        }

        // 体积校验
        let byte_size = snapshot.estimated_byte_size();
        result.estimated_byte_size = byte_size;
        if byte_size > self.max_byte_size {
            result.error(format!(
                "快照体积超限: {} 字节 > {} 字节",
                byte_size, self.max_byte_size
            ));
            return result;
        }

        // 逐元素结构校验
        if options.validate_elements && count > 0 {
            let invalid = snapshot
                .elements
                .iter()
                .filter(|e| !e.is_structurally_valid())
                .count();

            if invalid == count {
                result.error(format!("全部元素无效: {} 个元素均缺少 id 或坐标非数值", count));
            } else if invalid > 0 {
                result.warn(format!("{} 个元素结构无效，已跳过", invalid));
            }
        }

        result
    }
}
