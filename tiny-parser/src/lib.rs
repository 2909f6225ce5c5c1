//! Сканер и парсер рекурсивного спуска для учебного языка TINY.
//!
//! ```
//! let root = tiny_parser::parse("read x; write x * 2").unwrap();
//! assert_eq!(root.label(), "read(x)");
//! assert_eq!(root.chain_len(), 2);
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use config::ParseOptions;
pub use error::ParseError;
pub use ir::ast::{BinaryOperator, Category, NodeKind, SyntaxNode};
pub use parser::{parse, parse_with, tokenize};
