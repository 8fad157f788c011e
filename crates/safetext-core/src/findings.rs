//! 单行分析的中间状态（检测器之间传递）

/// 某个参考字符在当前行中的命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMatch {
    /// 参考数据中的标识名（原样保留，用作报告键）
    pub identifier: String,
    /// 非重叠出现次数
    pub count: usize,
}

/// 单行工作状态：每行新建，由检测器链依次修改，生成 Summary 后丢弃
#[derive(Debug, Clone)]
pub struct LineState {
    pub(crate) line: String,
    pub(crate) matches: Vec<CharMatch>,
    pub(crate) annotated: String,
}

impl LineState {
    /// 以原始行初始化；标注文本从原始行起步
    pub fn new(line: &str) -> Self {
        Self { line: line.to_string(), matches: Vec::new(), annotated: line.to_string() }
    }

    pub fn line(&self) -> &str { &self.line }

    pub fn matches(&self) -> &[CharMatch] { &self.matches }

    pub fn annotated(&self) -> &str { &self.annotated }

    /// 记录一次命中并在标注文本上包裹该字符串
    pub fn record(&mut self, identifier: &str, value: &str, count: usize) {
        self.matches.push(CharMatch { identifier: identifier.to_string(), count });
        self.annotated = crate::annotate::mark_occurrences(&self.annotated, value);
    }
}
