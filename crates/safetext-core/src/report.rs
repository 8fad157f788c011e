//! 汇总：将多行 Summary 折叠为一份 SummaryReport
use crate::types::{percent_of, Summary, SummaryReport};

impl SummaryReport {
    /// 追加一行结果（按输入顺序）；百分比在 `finish` 时统一计算
    pub fn push(&mut self, summary: &Summary) {
        self.count += summary.count;
        self.total += summary.total;
        self.positives.extend(summary.positives.iter().cloned());
        self.original.push_str(&summary.line);
        self.original.push('\n');
        self.appearances.push_str(&summary.appearances);
        self.appearances.push('\n');
    }

    /// 基于累计值计算整体百分比（不是各行百分比的平均）
    pub fn finish(mut self) -> Self {
        self.percent = percent_of(self.total, self.count);
        self
    }
}

/// 按输入顺序折叠；哪些行参与汇总由调用方决定
pub fn summarize<'a, I>(summaries: I) -> SummaryReport
where
    I: IntoIterator<Item = &'a Summary>,
{
    let mut report = SummaryReport::default();
    for s in summaries {
        report.push(s);
    }
    report.finish()
}
