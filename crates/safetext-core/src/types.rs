//! 公共类型（对外暴露）
use serde::Serialize;

/// 单行分析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// 行内 Unicode 码点数（非字节数），百分比的分母
    pub count: usize,
    #[serde(rename = "total_steganographic")]
    pub total: usize,
    #[serde(rename = "percent_steganographic")]
    pub percent: f64,
    pub positives: Vec<String>,
    #[serde(rename = "original")]
    pub line: String,
    pub appearances: String,
}

/// 整篇文档的汇总报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryReport {
    pub count: usize,
    #[serde(rename = "total_steganographic")]
    pub total: usize,
    #[serde(rename = "percent_steganographic")]
    pub percent: f64,
    pub positives: Vec<String>,
    pub original: String,
    pub appearances: String,
}

/// total / count * 100；分母为 0（空行或空文档）时定义为 0.0
pub fn percent_of(total: usize, count: usize) -> f64 {
    if count == 0 { return 0.0; }
    total as f64 / count as f64 * 100.0
}
