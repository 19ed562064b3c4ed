//! 采样参数
//!
//! 三类生成任务各自的默认温度与最大输出 token 数

use serde::{Deserialize, Serialize};

/// 单次调用的采样参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingParams {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// 大纲生成
    pub const OUTLINE: SamplingParams = SamplingParams::new(0.7, 2000);

    /// 章节生成
    pub const CHAPTER: SamplingParams = SamplingParams::new(0.8, 2500);

    /// 章节编辑
    pub const EDIT: SamplingParams = SamplingParams::new(0.6, 3000);

    /// 用调用方提供的值覆盖默认值
    pub fn with_overrides(self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        Self {
            temperature: temperature.unwrap_or(self.temperature),
            max_tokens: max_tokens.unwrap_or(self.max_tokens),
        }
    }

    /// 检查参数范围，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        assert_eq!(SamplingParams::OUTLINE, SamplingParams::new(0.7, 2000));
        assert_eq!(SamplingParams::CHAPTER, SamplingParams::new(0.8, 2500));
        assert_eq!(SamplingParams::EDIT, SamplingParams::new(0.6, 3000));
    }

    #[test]
    fn test_partial_override() {
        let params = SamplingParams::CHAPTER.with_overrides(None, Some(4000));
        assert_eq!(params.temperature, 0.8);
        assert_eq!(params.max_tokens, 4000);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(SamplingParams::new(2.5, 100).validate().is_err());
        assert!(SamplingParams::new(0.5, 0).validate().is_err());
        assert!(SamplingParams::EDIT.validate().is_ok());
    }
}
