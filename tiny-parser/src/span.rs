use std::fmt;

/// Позиция лексемы в исходнике: строка и колонка считаются с 1,
/// `start`/`end` - байтовые смещения (end не включается).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, start: usize, end: usize) -> Self {
        Self { line, column, start, end }
    }

    /// Пустой span в точке - для конца ввода
    pub fn point(line: usize, column: usize, offset: usize) -> Self {
        Self::new(line, column, offset, offset)
    }

    /// От начала `self` до конца `other`
    pub fn to(&self, other: Span) -> Span {
        Self::new(self.line, self.column, self.start, other.end.max(self.end))
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            start: 0,
            end: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
