//! 单行分析：运行检测器链并生成 Summary
use crate::detectors::DetectorChain;
use crate::error::Result;
use crate::findings::LineState;
use crate::options::PositivesMode;
use crate::prefilter::Prefilter;
use crate::reference::ReferenceSet;
use crate::types::{percent_of, Summary};

/// 行分析器：持有检测器链与预筛自动机，构建后只读，可跨线程共享
pub struct Analyzer {
    chain: DetectorChain,
    prefilter: Prefilter,
}

impl Analyzer {
    pub fn new(chain: DetectorChain) -> Result<Self> {
        let prefilter = Prefilter::from_chain(&chain)?;
        Ok(Self { chain, prefilter })
    }

    /// 使用默认检测器链
    pub fn with_default_chain(reference: &ReferenceSet) -> Result<Self> {
        Self::new(DetectorChain::default_chain(reference))
    }

    pub fn chain(&self) -> &DetectorChain { &self.chain }

    /// 分析一行文本（positives 按默认模式生成）
    pub fn analyze(&self, line: &str) -> Summary {
        self.analyze_with(line, PositivesMode::default())
    }

    /// 分析一行文本；纯函数，不保留任何跨行状态
    pub fn analyze_with(&self, line: &str, mode: PositivesMode) -> Summary {
        let mut state = LineState::new(line);
        let literal_hit = self.prefilter.may_match(line);
        self.chain.run_where(&mut state, |idx| literal_hit || self.prefilter.always_runs(idx));
        summarize_state(state, mode)
    }
}

fn summarize_state(state: LineState, mode: PositivesMode) -> Summary {
    let count = state.line.chars().count();
    let mut total = 0usize;
    let mut positives = Vec::new();
    for m in &state.matches {
        total += m.count;
        match mode {
            PositivesMode::PerOccurrence => {
                positives.extend(std::iter::repeat(m.identifier.clone()).take(m.count));
            }
            PositivesMode::PerMatch => positives.push(m.identifier.clone()),
        }
    }
    Summary {
        count,
        total,
        percent: percent_of(total, count),
        positives,
        line: state.line,
        appearances: state.annotated,
    }
}
