//! 扫描主流程：按行读取、分析（串行或并行）并汇总
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

use crate::analyze::Analyzer;
use crate::error::{Result, SafetextError};
use crate::options::{ScanOptions, ScanStats};
use crate::types::{Summary, SummaryReport};

/// 扫描单个文件；打开失败直接返回错误，不会生成空报告
pub fn scan_path(path: &Path, analyzer: &Analyzer, opts: &ScanOptions) -> Result<(SummaryReport, ScanStats)> {
    let file = File::open(path).map_err(|source| SafetextError::Io { path: path.to_path_buf(), source })?;
    debug!(?path, "scanning file");
    scan_reader(BufReader::new(file), analyzer, opts)
}

/// 从任意 BufRead 按行扫描（`\n` 分隔，去掉行尾 `\r`）
/// 稳定性保证：无论是否并行，报告中的行顺序与输入一致
pub fn scan_reader<R: BufRead>(reader: R, analyzer: &Analyzer, opts: &ScanOptions) -> Result<(SummaryReport, ScanStats)> {
    let mut stats = ScanStats::default();
    let threads = opts.effective_threads();

    if threads > 1 {
        let lines = collect_lines(reader, opts, &mut stats)?;
        let summaries = analyze_parallel(&lines, analyzer, opts, threads)?;
        let mut report = SummaryReport::default();
        for s in &summaries {
            tally(s, &mut stats);
            report.push(s);
        }
        return Ok((report.finish(), stats));
    }

    // 串行路径：边读边分析，不保留整份输入
    let mut report = SummaryReport::default();
    for line in reader.split(b'\n') {
        let line = decode_line(line?, &mut stats);
        if !keep_line(&line, opts, &mut stats) { continue; }
        let summary = analyzer.analyze_with(&line, opts.positives);
        tally(&summary, &mut stats);
        report.push(&summary);
    }
    Ok((report.finish(), stats))
}

/// 并行调度：建独立 Rayon 线程池，par_iter 按下标收集以保持顺序
fn analyze_parallel(lines: &[String], analyzer: &Analyzer, opts: &ScanOptions, threads: usize) -> Result<Vec<Summary>> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    debug!(threads, lines = lines.len(), "analyzing lines in parallel");
    Ok(pool.install(|| lines.par_iter().map(|l| analyzer.analyze_with(l, opts.positives)).collect()))
}

fn collect_lines<R: BufRead>(reader: R, opts: &ScanOptions, stats: &mut ScanStats) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.split(b'\n') {
        let line = decode_line(line?, stats);
        if keep_line(&line, opts, stats) { lines.push(line); }
    }
    Ok(lines)
}

/// 去掉行尾 `\r` 并解码为 UTF-8；非法字节按有损方式替换
fn decode_line(mut raw: Vec<u8>, stats: &mut ScanStats) -> String {
    stats.lines_read += 1;
    if raw.last() == Some(&b'\r') { raw.pop(); }
    match String::from_utf8(raw) {
        Ok(s) => s,
        Err(e) => {
            stats.lines_lossy += 1;
            warn!(line = stats.lines_read, "invalid utf-8 in input, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// 行过滤策略：默认跳过空行
fn keep_line(line: &str, opts: &ScanOptions, stats: &mut ScanStats) -> bool {
    if line.is_empty() && !opts.include_empty_lines {
        stats.lines_skipped += 1;
        return false;
    }
    true
}

fn tally(summary: &Summary, stats: &mut ScanStats) {
    stats.lines_analyzed += 1;
    if summary.total > 0 { stats.lines_flagged += 1; }
}
