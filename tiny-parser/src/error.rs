use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Lexical error at {span}: {message}")]
    Lexical { message: String, span: Span },

    #[error("Syntax error at {span}: expected {expected}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Syntax error at {span}: expected {expected}, but reached end of input")]
    UnexpectedEof { expected: String, span: Span },

    #[error("Syntax error at {span}: unexpected {found} after the last statement")]
    TrailingInput { found: String, span: Span },

    #[error("Nesting too deep at {span}: limit is {limit}")]
    TooDeep { limit: usize, span: Span },

    #[error("Input too large: {len} bytes, limit is {limit}")]
    InputTooLarge { limit: usize, len: usize },

    #[error("Empty program: no statements found")]
    Empty,

    #[error("Emitter error: {message}")]
    EmitError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Позиция ошибки, если она известна
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical { span, .. }
            | Self::Syntax { span, .. }
            | Self::UnexpectedEof { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::TooDeep { span, .. } => Some(*span),
            Self::InputTooLarge { .. }
            | Self::Empty
            | Self::EmitError { .. }
            | Self::IoError { .. } => None,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::UnexpectedEof { .. } | Self::TrailingInput { .. }
        )
    }
}
