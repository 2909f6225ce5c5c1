use std::fmt::Write;

use crate::error::ParseError;
use crate::ir::ast::{NodeKind, SyntaxNode};

use super::{required_child, Emitter};

/// Печатает TINY-исходник обратно из дерева.
/// Бинарные операции всегда в скобках, поэтому повторный разбор даёт то же дерево.
pub struct SourceEmitter {
    out: String,
    indent: usize,
}

impl Emitter for SourceEmitter {
    fn emit(&mut self, root: &SyntaxNode) -> Result<String, ParseError> {
        self.out.clear();
        self.indent = 0;
        self.emit_sequence(root)?;
        self.out.push('\n');
        Ok(std::mem::take(&mut self.out))
    }
}

impl SourceEmitter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn emit_sequence(&mut self, head: &SyntaxNode) -> Result<(), ParseError> {
        for (i, node) in head.chain().enumerate() {
            if i > 0 {
                self.out.push_str(";\n");
            }
            self.pad();
            self.emit_statement(node)?;
        }
        Ok(())
    }

    fn emit_statement(&mut self, node: &SyntaxNode) -> Result<(), ParseError> {
        match node.kind() {
            NodeKind::If => {
                self.out.push_str("if ");
                self.emit_expression(required_child(node, 0)?)?;
                self.out.push_str(" then\n");
                self.emit_block(required_child(node, 1)?)?;
                if let Some(otherwise) = node.child(2) {
                    self.pad();
                    self.out.push_str("else\n");
                    self.emit_block(otherwise)?;
                }
                self.pad();
                self.out.push_str("end");
            }
            NodeKind::Repeat => {
                self.out.push_str("repeat\n");
                self.emit_block(required_child(node, 0)?)?;
                self.pad();
                self.out.push_str("until ");
                self.emit_expression(required_child(node, 1)?)?;
            }
            NodeKind::Assign(name) => {
                let _ = write!(self.out, "{} := ", name);
                self.emit_expression(required_child(node, 0)?)?;
            }
            NodeKind::Read(name) => {
                let _ = write!(self.out, "read {}", name);
            }
            NodeKind::Write => {
                self.out.push_str("write ");
                self.emit_expression(required_child(node, 0)?)?;
            }
            _ => {
                return Err(ParseError::EmitError {
                    message: format!("expected a statement, found '{}'", node.label()),
                });
            }
        }
        Ok(())
    }

    fn emit_block(&mut self, head: &SyntaxNode) -> Result<(), ParseError> {
        self.indent += 1;
        self.emit_sequence(head)?;
        self.indent -= 1;
        self.out.push('\n');
        Ok(())
    }

    fn emit_expression(&mut self, node: &SyntaxNode) -> Result<(), ParseError> {
        match node.kind() {
            NodeKind::Op(op) => {
                self.out.push('(');
                self.emit_expression(required_child(node, 0)?)?;
                let _ = write!(self.out, " {} ", op.symbol());
                self.emit_expression(required_child(node, 1)?)?;
                self.out.push(')');
            }
            NodeKind::Const(value) => self.out.push_str(value),
            NodeKind::Id(name) => self.out.push_str(name),
            _ => {
                return Err(ParseError::EmitError {
                    message: format!("expected an expression, found '{}'", node.label()),
                });
            }
        }
        Ok(())
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }
}

impl Default for SourceEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn prints_nested_statements() {
        let root = parse("read x; if x<10 then x:=x+1 else write x end").unwrap();
        let text = SourceEmitter::new().emit(&root).unwrap();
        let expected = "\
read x;
if (x < 10) then
  x := (x + 1)
else
  write x
end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn prints_repeat() {
        let root = parse("repeat x:=x-1 until x=0").unwrap();
        let text = SourceEmitter::new().emit(&root).unwrap();
        assert_eq!(text, "repeat\n  x := (x - 1)\nuntil (x = 0)\n");
    }
}
