//! 标注渲染：用括号包裹命中的字符

pub const MARK_OPEN: char = '(';
pub const MARK_CLOSE: char = ')';

/// 将 `text` 中所有非重叠的 `value` 字面量（从左到右）替换为 `(value)`
/// 纯文本替换，不依赖位置；多个检测器叠加时允许出现嵌套或相邻的括号
pub fn mark_occurrences(text: &str, value: &str) -> String {
    if value.is_empty() { return text.to_string(); }
    let mut wrapped = String::with_capacity(value.len() + 2);
    wrapped.push(MARK_OPEN);
    wrapped.push_str(value);
    wrapped.push(MARK_CLOSE);
    text.replace(value, &wrapped)
}

/// 去除 `values` 的括号标注，恢复原文
/// 仅对自身不含括号的字符串成立
pub fn strip_markup<'a, I>(annotated: &str, values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = annotated.to_string();
    for value in values {
        if value.is_empty() { continue; }
        let wrapped = format!("{MARK_OPEN}{value}{MARK_CLOSE}");
        // 叠加标注时同一字符可能被包裹多层，逐层剥离
        while out.contains(&wrapped) {
            out = out.replace(&wrapped, value);
        }
    }
    out
}
