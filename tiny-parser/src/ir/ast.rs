use std::fmt;

use crate::span::Span;

/// Категория узла: операторы рисуются квадратами, выражения - кругами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Statement,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// if exp then ... [else ...] end; дети: [условие, then, else?]
    If,
    /// repeat ... until exp; дети: [тело, условие]
    Repeat,
    /// x := exp; дети: [выражение]
    Assign(String),
    /// read x
    Read(String),
    /// write exp; дети: [выражение]
    Write,
    /// a + b; дети: [левый, правый]
    Op(BinaryOperator),
    Const(String),
    Id(String),
}

impl NodeKind {
    pub fn category(&self) -> Category {
        match self {
            Self::If | Self::Repeat | Self::Assign(_) | Self::Read(_) | Self::Write => {
                Category::Statement
            }
            Self::Op(_) | Self::Const(_) | Self::Id(_) => Category::Expression,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::If => f.write_str("if"),
            Self::Repeat => f.write_str("repeat"),
            Self::Assign(name) => write!(f, "assign({})", name),
            Self::Read(name) => write!(f, "read({})", name),
            Self::Write => f.write_str("write"),
            Self::Op(op) => write!(f, "op({})", op.symbol()),
            Self::Const(value) => write!(f, "const({})", value),
            Self::Id(name) => write!(f, "id({})", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Less,     // <
    Equal,    // =
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Less => "<",
            Self::Equal => "=",
        }
    }
}

/// Узел AST. Последовательность операторов - это цепочка через `next`,
/// а не отдельный контейнер.
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    children: Vec<SyntaxNode>,
    next: Option<Box<SyntaxNode>>,
}

impl SyntaxNode {
    pub(crate) fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            next: None,
        }
    }

    pub(crate) fn binary(op: BinaryOperator, left: SyntaxNode, right: SyntaxNode) -> Self {
        let span = left.span.to(right.span);
        let mut node = Self::new(NodeKind::Op(op), span);
        node.children.push(left);
        node.children.push(right);
        node
    }

    pub(crate) fn push_child(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    pub(crate) fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// Ссылка на следующий оператор ставится только у операторов
    pub(crate) fn set_next(&mut self, next: Option<Box<SyntaxNode>>) {
        debug_assert!(next.is_none() || self.category() == Category::Statement);
        self.next = next;
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> String {
        self.kind.to_string()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    pub fn next(&self) -> Option<&SyntaxNode> {
        self.next.as_deref()
    }

    /// Этот узел и все следующие за ним по `next`
    pub fn chain(&self) -> Chain<'_> {
        Chain { current: Some(self) }
    }

    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// Число узлов во всём дереве, включая цепочки
    pub fn count_nodes(&self) -> usize {
        self.chain()
            .map(|node| 1 + node.children.iter().map(SyntaxNode::count_nodes).sum::<usize>())
            .sum()
    }
}

impl Drop for SyntaxNode {
    // Дети и цепочка `next` уходят в рабочий список: освобождение без рекурсии
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        if let Some(next) = self.next.take() {
            pending.push(*next);
        }
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
            if let Some(next) = node.next.take() {
                pending.push(*next);
            }
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.chain();
        let mut right = other.chain();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if a.kind != b.kind || a.span != b.span || a.children != b.children {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind)
            .field("span", &self.span)
            .field("children", &self.children)
            .field("next", &self.next().map(SyntaxNode::label))
            .finish()
    }
}

pub struct Chain<'a> {
    current: Option<&'a SyntaxNode>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next();
        Some(node)
    }
}
