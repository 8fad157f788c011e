//! 版本信息（提交号与构建日期由构建环境注入）

const APP_NAME: &str = "safetext";
const DEFAULT_COMMIT: &str = "0000000000000000000000000000000000000000";

pub(crate) fn version_string() -> String {
    format_version(
        env!("CARGO_PKG_VERSION"),
        option_env!("SAFETEXT_COMMIT").unwrap_or(DEFAULT_COMMIT),
        option_env!("SAFETEXT_BUILD_DATE").unwrap_or("unknown"),
    )
}

fn format_version(version: &str, commit: &str, date: &str) -> String {
    let short: String = commit.chars().take(6).collect();
    format!("{APP_NAME}/{version} (commit: '{short}' ({date}))")
}
