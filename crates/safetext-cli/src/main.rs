use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use safetext_core::{scan_path, scan_reader, Analyzer, PositivesMode, ReferenceSet, ScanOptions, SummaryReport};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::input::{detect_stdin, select_mode, write_usage, write_version, Mode};

mod input;
mod version;

/// 命令行入口（基于 clap）
/// 版本号由 --version 自行输出到 stderr，故关闭 clap 自带的 version 标志
#[derive(Parser, Debug)]
#[command(
    name = "safetext",
    about = "safetext: identify steganographic characters in text content",
    disable_version_flag = true
)]
struct Cli {
    /// 待扫描文件；未指定且 stdin 为管道时读取 stdin
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// 输出版本信息到 stderr
    #[arg(short = 'V', long)]
    version: bool,

    /// 参考数据文件（JSON 或 TOML），默认使用内嵌数据
    #[arg(long)]
    reference: Option<PathBuf>,

    /// 线程数（"auto"=CPU 核心数，1=串行）
    #[arg(long, default_value = "auto", value_parser = parse_threads)]
    threads: Threads,

    /// 保留长度为 0 的行
    #[arg(long)]
    include_empty: bool,

    /// positives 列表：每次出现记录一次，或每个命中字符记录一次
    #[arg(long, value_enum, default_value_t = PositivesArg::PerOccurrence)]
    positives: PositivesArg,
}

/// --threads 的取值
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Threads {
    Auto,
    Fixed(usize),
}

impl From<Threads> for Option<usize> {
    fn from(t: Threads) -> Self {
        match t {
            Threads::Auto => None,
            Threads::Fixed(n) => Some(n),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositivesArg {
    PerOccurrence,
    PerMatch,
}

impl From<PositivesArg> for PositivesMode {
    fn from(p: PositivesArg) -> Self {
        match p {
            PositivesArg::PerOccurrence => PositivesMode::PerOccurrence,
            PositivesArg::PerMatch => PositivesMode::PerMatch,
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let mode = select_mode(cli.version, cli.file.as_deref(), detect_stdin());
    match &mode {
        Mode::Version => {
            write_version(&mut io::stderr())?;
            return Ok(());
        }
        // 既没有文件也没有管道输入：打印用法后正常退出
        Mode::Usage => {
            let help = Cli::command().render_help().to_string();
            write_usage(&mut io::stderr(), &help)?;
            return Ok(());
        }
        Mode::File(_) | Mode::Stdin => {}
    }

    let opts = ScanOptions {
        threads: cli.threads.into(),
        include_empty_lines: cli.include_empty,
        positives: cli.positives.into(),
    };

    // 参考数据加载失败即无法分析，直接退出
    let reference = ReferenceSet::resolve(cli.reference.as_deref()).context("load reference data")?;
    let analyzer = Analyzer::with_default_chain(&reference).context("build detector chain")?;
    debug!(detectors = ?analyzer.chain().names(), "detector chain ready");

    let (report, stats) = match &mode {
        Mode::File(path) => {
            info!(?path, "scanning file");
            scan_path(path, &analyzer, &opts).with_context(|| format!("cannot process input {}", path.display()))?
        }
        _ => {
            info!("scanning piped input");
            scan_reader(io::stdin().lock(), &analyzer, &opts).context("cannot process piped input")?
        }
    };

    write_report(&report)?;
    info!(
        lines_read = stats.lines_read,
        lines_analyzed = stats.lines_analyzed,
        lines_flagged = stats.lines_flagged,
        total = report.total,
        "scan finished"
    );
    Ok(())
}

/// 以 2 空格缩进的 JSON 输出到 stdout
fn write_report(report: &SummaryReport) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, report).context("serialize report")?;
    writeln!(out)?;
    out.flush().ok();
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，stdout 仅保留 JSON 报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数："auto" 或正整数，其余取值报错
fn parse_threads(s: &str) -> std::result::Result<Threads, String> {
    if s.eq_ignore_ascii_case("auto") { return Ok(Threads::Auto); }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Threads::Fixed(n)),
        _ => Err(format!("expected \"auto\" or a positive integer, got {s:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threads_argument() {
        assert_eq!(parse_threads("auto"), Ok(Threads::Auto));
        assert_eq!(parse_threads("AUTO"), Ok(Threads::Auto));
        assert_eq!(parse_threads("1"), Ok(Threads::Fixed(1)));
        assert_eq!(parse_threads("8"), Ok(Threads::Fixed(8)));
        assert!(parse_threads("0").is_err());
        assert!(parse_threads("many").is_err());
        assert_eq!(Option::<usize>::from(Threads::Auto), None);
        assert_eq!(Option::<usize>::from(Threads::Fixed(2)), Some(2));
    }

    #[test]
    fn invalid_threads_are_rejected_by_the_parser() {
        for bad in ["0", "many", "1.5"] {
            let err = Cli::try_parse_from(["safetext", "--threads", bad]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{bad}");
        }
    }

    #[test]
    fn version_flag_parses_without_input() {
        let cli = Cli::try_parse_from(["safetext", "-V"]).unwrap();
        assert!(cli.version);
        assert_eq!(select_mode(cli.version, cli.file.as_deref(), input::StdinKind::Terminal), Mode::Version);
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_file_and_positives() {
        let cli = Cli::try_parse_from(["safetext", "-f", "doc.txt", "--positives", "per-match"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("doc.txt")));
        assert!(matches!(cli.positives, PositivesArg::PerMatch));
        assert!(!cli.version);
        assert_eq!(cli.threads, Threads::Auto);
    }

    #[test]
    fn report_renders_with_two_space_indent() {
        let report = SummaryReport { count: 1, ..SummaryReport::default() };
        let txt = serde_json::to_string_pretty(&report).unwrap();
        assert!(txt.contains("\n  \"count\": 1,"));
        assert!(txt.contains("\"total_steganographic\": 0"));
    }
}
