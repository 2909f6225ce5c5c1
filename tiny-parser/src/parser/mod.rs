pub mod lexer;
pub mod parser;
pub mod token;

use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::ir::ast::SyntaxNode;

pub use lexer::tokenize;

/// Главная функция парсера - из текста в AST
pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// То же, что `parse`, но с явными ограничениями
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<SyntaxNode, ParseError> {
    if source.len() > options.max_input_len {
        return Err(ParseError::InputTooLarge {
            limit: options.max_input_len,
            len: source.len(),
        });
    }
    parser::parse_source(source, options)
}
