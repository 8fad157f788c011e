//! 参考字符集加载（JSON / TOML）
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, SafetextError};

/// 编译期内嵌的默认参考数据
const EMBEDDED_REFERENCE: &str = include_str!("../data/safetext.json");

pub const ZERO_WIDTH_CHARS: &str = "ZERO_WIDTH_CHARS";
pub const NON_STANDARD_SPACES: &str = "NON_STANDARD_SPACES";
pub const HOMOGLYPHS_EN: &str = "HOMOGLYPHS_EN";
/// 额外同形字分类的键前缀（如 HOMOGLYPHS_DE）
const HOMOGLYPHS_PREFIX: &str = "HOMOGLYPHS_";

/// 单个分类：标识名 -> 待搜索的字面字符串（可为多个码点）
/// 使用 BTreeMap 保证逐行命中顺序稳定
pub type CharMapping = BTreeMap<String, String>;

/// 顶层参考文件结构：分类名 -> 映射
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ReferenceFile {
    categories: BTreeMap<String, CharMapping>,
}

/// 进程级只读参考数据
/// 加载后不可变；各映射以 Arc 共享给检测器
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    zero_width: Arc<CharMapping>,
    non_standard_spaces: Arc<CharMapping>,
    homoglyphs_en: Arc<CharMapping>,
    /// 其他语言的同形字分类（按分类名排序）
    extra_homoglyphs: Vec<(String, Arc<CharMapping>)>,
}

impl ReferenceSet {
    /// 加载内嵌参考数据
    pub fn load() -> Result<Self> {
        Self::from_json_str(EMBEDDED_REFERENCE)
    }

    /// 指定路径时读取文件，否则使用内嵌数据
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::load(),
        }
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        let parsed: ReferenceFile = serde_json::from_str(txt)?;
        Self::from_file(parsed)
    }

    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let parsed: ReferenceFile = toml::from_str(txt)?;
        Self::from_file(parsed)
    }

    /// 从磁盘加载参考文件：扩展名为 .toml 时按 TOML 解析，其余按 JSON
    pub fn from_path(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .map_err(|source| SafetextError::Io { path: path.to_path_buf(), source })?;
        let is_toml = path.extension().map_or(false, |e| e.eq_ignore_ascii_case("toml"));
        debug!(?path, is_toml, "loading reference data");
        if is_toml { Self::from_toml_str(&txt) } else { Self::from_json_str(&txt) }
    }

    fn from_file(parsed: ReferenceFile) -> Result<Self> {
        let mut categories = parsed.categories;
        for (category, mapping) in &categories {
            validate(category, mapping)?;
        }

        let mut take = |name: &'static str| {
            categories.remove(name).map(Arc::new).ok_or(SafetextError::MissingCategory(name))
        };
        let zero_width = take(ZERO_WIDTH_CHARS)?;
        let non_standard_spaces = take(NON_STANDARD_SPACES)?;
        let homoglyphs_en = take(HOMOGLYPHS_EN)?;

        // 其余分类仅接受 HOMOGLYPHS_* 形式，未知分类忽略
        let mut extra_homoglyphs = Vec::new();
        for (name, mapping) in categories {
            if name.starts_with(HOMOGLYPHS_PREFIX) {
                extra_homoglyphs.push((name, Arc::new(mapping)));
            } else {
                debug!(category = %name, "ignoring unknown reference category");
            }
        }

        let set = Self { zero_width, non_standard_spaces, homoglyphs_en, extra_homoglyphs };
        debug!(
            zero_width = set.zero_width.len(),
            non_standard_spaces = set.non_standard_spaces.len(),
            homoglyphs_en = set.homoglyphs_en.len(),
            extra = set.extra_homoglyphs.len(),
            "reference data loaded"
        );
        Ok(set)
    }

    pub fn zero_width(&self) -> &Arc<CharMapping> { &self.zero_width }

    pub fn non_standard_spaces(&self) -> &Arc<CharMapping> { &self.non_standard_spaces }

    pub fn homoglyphs_en(&self) -> &Arc<CharMapping> { &self.homoglyphs_en }

    pub fn extra_homoglyphs(&self) -> &[(String, Arc<CharMapping>)] { &self.extra_homoglyphs }
}

/// 拒绝空字符串：空串在任意位置都会命中，计数与标注均失去意义
fn validate(category: &str, mapping: &CharMapping) -> Result<()> {
    match mapping.iter().find(|(_, v)| v.is_empty()) {
        Some((identifier, _)) => Err(SafetextError::EmptyValue {
            category: category.to_string(),
            identifier: identifier.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_reference_loads() {
        let set = ReferenceSet::load().unwrap();
        assert_eq!(set.zero_width().get("WORD JOINER").map(String::as_str), Some("\u{2060}"));
        assert_eq!(set.non_standard_spaces().get("NO-BREAK SPACE").map(String::as_str), Some("\u{a0}"));
        assert_eq!(set.homoglyphs_en().get("CYRILLIC SMALL LETTER A").map(String::as_str), Some("\u{430}"));
        assert!(set.extra_homoglyphs().is_empty());
    }

    #[test]
    fn embedded_reference_has_no_ascii_values() {
        let set = ReferenceSet::load().unwrap();
        for mapping in [set.zero_width(), set.non_standard_spaces(), set.homoglyphs_en()] {
            for (id, value) in mapping.iter() {
                assert!(!value.is_ascii(), "{id} maps to an ascii value");
            }
        }
    }

    #[test]
    fn missing_category_is_an_error() {
        let err = ReferenceSet::from_json_str(r#"{"ZERO_WIDTH_CHARS": {}, "HOMOGLYPHS_EN": {}}"#).unwrap_err();
        assert!(matches!(err, SafetextError::MissingCategory(NON_STANDARD_SPACES)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ReferenceSet::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SafetextError::Json(_)));
    }

    #[test]
    fn empty_value_is_rejected() {
        let txt = r#"{
            "ZERO_WIDTH_CHARS": {"NOTHING": ""},
            "NON_STANDARD_SPACES": {},
            "HOMOGLYPHS_EN": {}
        }"#;
        match ReferenceSet::from_json_str(txt).unwrap_err() {
            SafetextError::EmptyValue { category, identifier } => {
                assert_eq!(category, ZERO_WIDTH_CHARS);
                assert_eq!(identifier, "NOTHING");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_homoglyph_categories_are_kept_in_name_order() {
        let txt = r#"
            [ZERO_WIDTH_CHARS]
            [NON_STANDARD_SPACES]
            [HOMOGLYPHS_EN]
            [HOMOGLYPHS_RU]
            "LATIN SMALL LETTER A" = "a"
            [HOMOGLYPHS_DE]
            "GREEK SMALL LETTER NU" = "ν"
            [SOMETHING_ELSE]
            "X" = "x"
        "#;
        let set = ReferenceSet::from_toml_str(txt).unwrap();
        let names: Vec<&str> = set.extra_homoglyphs().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["HOMOGLYPHS_DE", "HOMOGLYPHS_RU"]);
    }

    #[test]
    fn from_path_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("reference.toml");
        std::fs::write(
            &toml_path,
            "[ZERO_WIDTH_CHARS]\n\"ZERO WIDTH SPACE\" = \"\u{200b}\"\n[NON_STANDARD_SPACES]\n[HOMOGLYPHS_EN]\n",
        )
        .unwrap();
        let set = ReferenceSet::from_path(&toml_path).unwrap();
        assert_eq!(set.zero_width().len(), 1);

        let missing = dir.path().join("missing.json");
        assert!(matches!(ReferenceSet::from_path(&missing), Err(SafetextError::Io { .. })));
    }
}
