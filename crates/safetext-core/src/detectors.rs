//! 检测器与检测器链
use std::sync::Arc;

use crate::findings::LineState;
use crate::reference::{CharMapping, ReferenceSet, HOMOGLYPHS_EN, NON_STANDARD_SPACES, ZERO_WIDTH_CHARS};

/// 检测器能力：扫描一行并在共享状态上记录命中与标注
/// 检测器之间相互独立，任意子集与顺序均有效
pub trait Detector: Send + Sync {
    /// 检测器名称（日志与调试用）
    fn name(&self) -> &str;

    /// 该检测器搜索的全部字面量，用于构建预筛自动机
    /// - Some：只可能在含其中某个字面量的行上命中（空集合表示从不命中）
    /// - None：无法用字面量描述（如按字符属性判断），每行都会运行
    fn needles(&self) -> Option<Vec<&str>>;

    fn detect(&self, state: &mut LineState);
}

/// 基于参考映射的检测器（零宽字符 / 非标准空格 / 同形字 均为此类）
pub struct MappingDetector {
    name: String,
    mapping: Arc<CharMapping>,
}

impl MappingDetector {
    pub fn new(name: impl Into<String>, mapping: Arc<CharMapping>) -> Self {
        Self { name: name.into(), mapping }
    }

    pub fn zero_width(reference: &ReferenceSet) -> Self {
        Self::new(ZERO_WIDTH_CHARS, Arc::clone(reference.zero_width()))
    }

    pub fn non_standard_spaces(reference: &ReferenceSet) -> Self {
        Self::new(NON_STANDARD_SPACES, Arc::clone(reference.non_standard_spaces()))
    }

    pub fn homoglyphs_en(reference: &ReferenceSet) -> Self {
        Self::new(HOMOGLYPHS_EN, Arc::clone(reference.homoglyphs_en()))
    }
}

impl Detector for MappingDetector {
    fn name(&self) -> &str { &self.name }

    fn needles(&self) -> Option<Vec<&str>> {
        Some(self.mapping.values().map(String::as_str).collect())
    }

    fn detect(&self, state: &mut LineState) {
        for (identifier, value) in self.mapping.iter() {
            // 计数基于原始行（非标注文本），标注叠加在当前工作副本上
            let count = state.line.matches(value.as_str()).count();
            if count == 0 { continue; }
            state.record(identifier, value, count);
        }
    }
}

/// 有序检测器链：按顺序依次作用于同一行状态
#[derive(Default)]
pub struct DetectorChain {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorChain {
    pub fn new() -> Self { Self::default() }

    /// 默认链：零宽字符 → 非标准空格 → 同形字（EN）→ 其他语言同形字（按分类名）
    pub fn default_chain(reference: &ReferenceSet) -> Self {
        let mut chain = Self::new();
        chain.push(Box::new(MappingDetector::zero_width(reference)));
        chain.push(Box::new(MappingDetector::non_standard_spaces(reference)));
        chain.push(Box::new(MappingDetector::homoglyphs_en(reference)));
        for (name, mapping) in reference.extra_homoglyphs() {
            chain.push(Box::new(MappingDetector::new(name.clone(), Arc::clone(mapping))));
        }
        chain
    }

    /// 在链尾追加检测器（扩展点）
    pub fn push(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn len(&self) -> usize { self.detectors.len() }

    pub fn is_empty(&self) -> bool { self.detectors.is_empty() }

    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// 各检测器的搜索字面量，下标与链中顺序一致
    pub(crate) fn needles(&self) -> Vec<Option<Vec<&str>>> {
        self.detectors.iter().map(|d| d.needles()).collect()
    }

    #[cfg(test)]
    pub(crate) fn run(&self, state: &mut LineState) {
        self.run_where(state, |_| true);
    }

    /// 仅运行 `selected(下标)` 为真的检测器，顺序不变
    pub(crate) fn run_where<F>(&self, state: &mut LineState, selected: F)
    where
        F: Fn(usize) -> bool,
    {
        for (idx, detector) in self.detectors.iter().enumerate() {
            if selected(idx) { detector.detect(state); }
        }
    }
}
