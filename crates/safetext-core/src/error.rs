//! 错误类型（对外暴露）
use std::path::PathBuf;
use thiserror::Error;

/// 核心库统一错误
#[derive(Debug, Error)]
pub enum SafetextError {
    /// 读取参考数据或输入文本失败
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 读取输入流失败（无路径，如 stdin）
    #[error("i/o error while reading input: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed reference data (json): {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed reference data (toml): {0}")]
    Toml(#[from] toml::de::Error),

    /// 参考数据缺少必需的分类
    #[error("reference data is missing category {0}")]
    MissingCategory(&'static str),

    /// 参考数据中存在空字符串（空串会在每个字符之间命中）
    #[error("reference data category {category} has an empty value for {identifier:?}")]
    EmptyValue { category: String, identifier: String },

    #[error("failed to build prefilter automaton: {0}")]
    Prefilter(#[from] aho_corasick::BuildError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SafetextError>;
