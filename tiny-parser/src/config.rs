/// Ограничения одного вызова парсера.
///
/// Грамматика рекурсивная, поэтому глубина вложенности `stmt_sequence`/`exp`
/// напрямую превращается в глубину стека.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Максимальная вложенность последовательностей и выражений
    pub max_depth: usize,
    /// Максимальный размер исходника в байтах
    pub max_input_len: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 100;
    pub const DEFAULT_MAX_INPUT_LEN: usize = 1024 * 1024;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
        }
    }
}
