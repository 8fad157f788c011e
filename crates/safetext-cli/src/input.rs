//! 运行模式选择：版本 / 用法 / 文件 / 管道输入
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crate::version;

/// stdin 的来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StdinKind {
    /// 终端（交互式）
    Terminal,
    /// 管道、socket 或重定向的普通文件
    Piped,
    /// 其他设备（如 `</dev/null`），不视为输入
    Device,
}

/// 本次运行要做的事
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Version,
    Usage,
    File(PathBuf),
    Stdin,
}

/// 优先级：--version > -f > 管道输入 > 打印用法
pub(crate) fn select_mode(version: bool, file: Option<&Path>, stdin: StdinKind) -> Mode {
    if version { return Mode::Version; }
    if let Some(path) = file { return Mode::File(path.to_path_buf()); }
    match stdin {
        StdinKind::Piped => Mode::Stdin,
        StdinKind::Terminal | StdinKind::Device => Mode::Usage,
    }
}

/// 判断当前进程的 stdin 类型
pub(crate) fn detect_stdin() -> StdinKind {
    let stdin = io::stdin();
    if stdin.is_terminal() { return StdinKind::Terminal; }
    classify_stdin(&stdin)
}

#[cfg(unix)]
fn classify_stdin(stdin: &io::Stdin) -> StdinKind {
    use std::os::fd::AsFd;

    // 复制 fd 后取元数据，不影响原 stdin
    let meta = stdin
        .as_fd()
        .try_clone_to_owned()
        .map(std::fs::File::from)
        .and_then(|f| f.metadata());
    match meta {
        Ok(m) => classify_file_type(m.file_type()),
        // 无法判断时按管道处理，保持原有行为
        Err(_) => StdinKind::Piped,
    }
}

#[cfg(not(unix))]
fn classify_stdin(_stdin: &io::Stdin) -> StdinKind {
    StdinKind::Piped
}

#[cfg(unix)]
fn classify_file_type(ft: std::fs::FileType) -> StdinKind {
    use std::os::unix::fs::FileTypeExt;

    if ft.is_fifo() || ft.is_socket() || ft.is_file() {
        StdinKind::Piped
    } else {
        StdinKind::Device
    }
}

pub(crate) fn write_version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", version::version_string())
}

pub(crate) fn write_usage(out: &mut dyn Write, help: &str) -> io::Result<()> {
    writeln!(out, "safetext: identify steganographic characters in text content")?;
    writeln!(out, "usage: safetext -f <input file> | <command> | safetext")?;
    writeln!(out)?;
    writeln!(out, "output: [JSON]   {{safetext summary}}")?;
    writeln!(out, "output: [STRING] '{}'", version::version_string())?;
    writeln!(out)?;
    write!(out, "{help}")
}
