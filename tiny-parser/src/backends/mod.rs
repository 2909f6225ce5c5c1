pub mod dot;
pub mod source;
pub mod tree;

use crate::error::ParseError;
use crate::ir::ast::SyntaxNode;

/// Потребитель готового AST: превращает дерево в текст
pub trait Emitter {
    fn emit(&mut self, root: &SyntaxNode) -> Result<String, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterType {
    Tree,
    Dot,
    Source,
}

impl EmitterType {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Tree,
            Self::Dot,
            Self::Source,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|e| e.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Dot => "dot",
            Self::Source => "source",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Tree => "Indented outline of node labels",
            Self::Dot => "Graphviz DOT graph of the syntax tree",
            Self::Source => "TINY source reconstructed from the tree",
        }
    }

    pub fn create(&self) -> Box<dyn Emitter> {
        match self {
            Self::Tree => Box::new(tree::TreeEmitter::new()),
            Self::Dot => Box::new(dot::DotEmitter::new()),
            Self::Source => Box::new(source::SourceEmitter::new()),
        }
    }
}

/// Обязательный ребёнок узла; отсутствие - ошибка формы дерева
pub(crate) fn required_child(node: &SyntaxNode, index: usize) -> Result<&SyntaxNode, ParseError> {
    node.child(index).ok_or_else(|| ParseError::EmitError {
        message: format!("node '{}' has no child #{}", node.label(), index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for emitter in EmitterType::all() {
            assert_eq!(EmitterType::from_name(emitter.name()), Some(emitter));
        }
        assert_eq!(EmitterType::from_name("png"), None);
    }
}
