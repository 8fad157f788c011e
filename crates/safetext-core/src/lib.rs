//! 隐写字符检测核心库
//!
//! 设计要点：
//! - 参考字符集（零宽字符 / 非标准空格 / 同形字）启动时一次性加载，之后只读共享。
//! - 检测器链按固定顺序作用于单行状态：计数基于原始行，括号标注叠加在工作副本上。
//! - 单行分析为纯函数；多行结果按输入顺序折叠为一份报告。
//! - 百分比以码点数为分母；分母为 0 时定义为 0.0。

mod analyze;
mod annotate;
mod detectors;
mod error;
mod findings;
mod options;
mod prefilter;
mod reference;
mod report;
mod scan;
mod types;

pub use analyze::Analyzer;
pub use annotate::{mark_occurrences, strip_markup};
pub use detectors::{Detector, DetectorChain, MappingDetector};
pub use error::{Result, SafetextError};
pub use findings::{CharMatch, LineState};
pub use options::{PositivesMode, ScanOptions, ScanStats};
pub use reference::{CharMapping, ReferenceSet, HOMOGLYPHS_EN, NON_STANDARD_SPACES, ZERO_WIDTH_CHARS};
pub use report::summarize;
pub use scan::{scan_path, scan_reader};
pub use types::{percent_of, Summary, SummaryReport};
