use std::fmt::Write;

use crate::error::ParseError;
use crate::ir::ast::{Category, SyntaxNode};

use super::Emitter;

/// Граф для Graphviz в формате DOT. Запуск `dot` и отрисовка - забота вызывающего.
///
/// Идентификаторы узлов раздаются во время обхода, парсер о них не знает.
pub struct DotEmitter {
    out: String,
    next_id: usize,
}

impl Emitter for DotEmitter {
    fn emit(&mut self, root: &SyntaxNode) -> Result<String, ParseError> {
        self.out.clear();
        self.next_id = 0;

        self.line("graph ast {");
        self.line("  splines=true;");
        self.emit_chain(root);
        self.line("}");

        Ok(std::mem::take(&mut self.out))
    }
}

impl DotEmitter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            next_id: 0,
        }
    }

    /// Рисует цепочку операторов, возвращает id её первого узла
    fn emit_chain(&mut self, head: &SyntaxNode) -> usize {
        let mut first = None;
        let mut previous: Option<usize> = None;

        for node in head.chain() {
            let id = self.emit_node(node);
            if let Some(prev) = previous {
                self.line(&format!(
                    "  n{prev} -- n{id} [tailport=e, headport=w, style=dashed];"
                ));
                self.line(&format!("  {{ rank=same; n{prev}; n{id}; }}"));
            }
            first.get_or_insert(id);
            previous = Some(id);
        }

        first.unwrap_or_default()
    }

    fn emit_node(&mut self, node: &SyntaxNode) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let shape = match node.category() {
            Category::Statement => "box",
            Category::Expression => "ellipse",
        };
        self.line(&format!(
            "  n{id} [label=\"{}\", shape={shape}];",
            escape(&node.label())
        ));

        let mut child_ids = Vec::with_capacity(node.children().len());
        for child in node.children() {
            let child_id = self.emit_chain(child);
            self.line(&format!("  n{id} -- n{child_id};"));
            child_ids.push(child_id);
        }

        // if с веткой else: условие и обе ветки в один ряд
        if child_ids.len() > 2 {
            let group: Vec<String> = child_ids.iter().map(|c| format!("n{c};")).collect();
            self.line(&format!("  {{ rank=same; {} }}", group.join(" ")));
        }

        id
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }
}

impl Default for DotEmitter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
