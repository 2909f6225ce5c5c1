use std::fmt::Write;

use crate::error::ParseError;
use crate::ir::ast::SyntaxNode;

use super::Emitter;

/// Текстовый контур дерева: дети с отступом, цепочка `next` на том же уровне
pub struct TreeEmitter {
    out: String,
    indent: usize,
}

impl Emitter for TreeEmitter {
    fn emit(&mut self, root: &SyntaxNode) -> Result<String, ParseError> {
        self.out.clear();
        self.indent = 0;
        self.emit_chain(root);
        Ok(std::mem::take(&mut self.out))
    }
}

impl TreeEmitter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn emit_chain(&mut self, head: &SyntaxNode) {
        for node in head.chain() {
            // запись в String не падает
            let _ = writeln!(self.out, "{:width$}{}", "", node.kind(), width = self.indent * 2);

            self.indent += 1;
            for child in node.children() {
                self.emit_chain(child);
            }
            self.indent -= 1;
        }
    }
}

impl Default for TreeEmitter {
    fn default() -> Self {
        Self::new()
    }
}
