//! 扫描选项与统计信息（模块）

/// positives 列表的生成方式
/// - PerOccurrence：每次出现记录一次标识名，与 total 一致
/// - PerMatch：每个命中的字符只记录一次（旧行为）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositivesMode {
    #[default]
    PerOccurrence,
    PerMatch,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 是否保留长度为 0 的行（默认跳过）
    pub include_empty_lines: bool,
    /// 扫描驱动按此模式生成每行的 positives
    pub positives: PositivesMode,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threads: Some(1),
            include_empty_lines: false,
            positives: PositivesMode::default(),
        }
    }
}

impl ScanOptions {
    /// 实际线程数（auto 取 CPU 核数，至少为 1）
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_read: usize,
    pub lines_analyzed: usize,
    pub lines_skipped: usize,
    /// 至少包含一个可疑字符的行数
    pub lines_flagged: usize,
    /// 含非法 UTF-8 字节、按有损方式解码的行数
    pub lines_lossy: usize,
}
