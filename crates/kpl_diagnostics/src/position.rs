//! Position - 源码位置信息
//!
//! KPL 的诊断只报告 1-based 的行号和列号

use std::fmt;

/// 源码位置 (行, 列)，均从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// 创建新的位置
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 换算为源码中的字节偏移
    ///
    /// 超出源码范围的位置会被截断到末尾，列号按字符计数。
    pub fn offset_in(&self, source: &str) -> usize {
        let mut offset = 0;
        for (index, line) in source.split_inclusive('\n').enumerate() {
            if index + 1 == self.line {
                let column_bytes: usize = line
                    .chars()
                    .take(self.column.saturating_sub(1))
                    .map(char::len_utf8)
                    .sum();
                return offset + column_bytes;
            }
            offset += line.len();
        }
        source.len()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
