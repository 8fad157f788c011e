//! 预筛（Aho-Corasick）
//!
//! 绝大多数行不含任何可疑字符。用检测器链的全部字面量构建一个自动机，
//! 未命中的行跳过可预筛的检测器；无法给出字面量的检测器每行都运行。
//! 预筛与否不影响任何统计结果。

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::BTreeSet;

use crate::detectors::DetectorChain;
use crate::error::Result;

pub(crate) struct Prefilter {
    /// 字面量为空时为 None，此时任何行都不会命中
    ac: Option<AhoCorasick>,
    /// 下标与检测器链一致：true 表示该检测器不参与预筛
    always_run: Vec<bool>,
}

impl Prefilter {
    /// 从检测器链构建（字面量去重）
    pub(crate) fn from_chain(chain: &DetectorChain) -> Result<Self> {
        let per_detector = chain.needles();
        let always_run: Vec<bool> = per_detector.iter().map(Option::is_none).collect();
        let needles: BTreeSet<&str> = per_detector
            .into_iter()
            .flatten()
            .flatten()
            .filter(|n| !n.is_empty())
            .collect();
        if needles.is_empty() {
            return Ok(Self { ac: None, always_run });
        }
        let ac = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&needles)?;
        Ok(Self { ac: Some(ac), always_run })
    }

    /// 行中是否可能包含任一字面量
    pub(crate) fn may_match(&self, line: &str) -> bool {
        match &self.ac {
            Some(ac) => ac.is_match(line),
            None => false,
        }
    }

    /// 第 `idx` 个检测器是否绕过预筛
    pub(crate) fn always_runs(&self, idx: usize) -> bool {
        self.always_run.get(idx).copied().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::Detector;
    use crate::findings::LineState;
    use crate::reference::ReferenceSet;

    struct AnyControl;

    impl Detector for AnyControl {
        fn name(&self) -> &str { "CONTROL" }

        fn needles(&self) -> Option<Vec<&str>> { None }

        fn detect(&self, _state: &mut LineState) {}
    }

    #[test]
    fn matches_only_lines_with_needles() {
        let reference = ReferenceSet::load().unwrap();
        let pf = Prefilter::from_chain(&DetectorChain::default_chain(&reference)).unwrap();
        assert!(!pf.may_match("an entirely ordinary line of ascii text"));
        assert!(pf.may_match("zero\u{200b}width"));
        assert!(pf.may_match("no\u{a0}break"));
        assert!(pf.may_match("\u{441}yrillic"));
        assert!(!pf.always_runs(0));
    }

    #[test]
    fn empty_chain_never_matches() {
        let pf = Prefilter::from_chain(&DetectorChain::new()).unwrap();
        assert!(!pf.may_match("anything\u{200b}"));
    }

    #[test]
    fn detectors_without_needles_bypass_the_prefilter() {
        let reference = ReferenceSet::load().unwrap();
        let mut chain = DetectorChain::default_chain(&reference);
        chain.push(Box::new(AnyControl));
        let pf = Prefilter::from_chain(&chain).unwrap();
        assert_eq!((0..4).map(|i| pf.always_runs(i)).collect::<Vec<_>>(), vec![false, false, false, true]);
        // 字面量集合不受影响
        assert!(!pf.may_match("ding\u{7}"));
    }
}
