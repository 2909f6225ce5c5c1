use tracing::debug;

use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::ir::ast::{BinaryOperator, NodeKind, SyntaxNode};
use crate::span::Span;
use super::lexer::Scanner;
use super::token::{Token, TokenKind};

pub fn parse_source(source: &str, options: &ParseOptions) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser::new(source, *options)?;
    parser.parse_program()
}

/// Рекурсивный спуск с одним токеном предпросмотра.
/// Одна процедура на каждый нетерминал грамматики.
struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Option<Token>,
    previous: Span,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, options: ParseOptions) -> Result<Self, ParseError> {
        let mut parser = Self {
            scanner: Scanner::new(source),
            current: None,
            previous: Span::default(),
            depth: 0,
            options,
        };
        parser.advance()?;
        Ok(parser)
    }

    // program := stmt_sequence
    fn parse_program(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.current.is_none() {
            return Err(ParseError::Empty);
        }

        let root = self.stmt_sequence()?;

        if let Some(token) = &self.current {
            return Err(ParseError::TrailingInput {
                found: token.to_string(),
                span: token.span,
            });
        }

        debug!(statements = root.chain_len(), nodes = root.count_nodes(), "parsed program");
        Ok(root)
    }

    // stmt_sequence := statement ( ';' statement )*
    fn stmt_sequence(&mut self) -> Result<SyntaxNode, ParseError> {
        self.nested(|parser| {
            let mut first = parser.statement()?;
            let mut rest = Vec::new();

            while parser.check(TokenKind::Semi) {
                parser.advance()?; // consume ';'
                rest.push(parser.statement()?);
            }

            debug!(statements = rest.len() + 1, "statement sequence");

            // Связываем с конца: каждый узел владеет хвостом списка
            let mut tail: Option<Box<SyntaxNode>> = None;
            for mut node in rest.into_iter().rev() {
                node.set_next(tail);
                tail = Some(Box::new(node));
            }
            first.set_next(tail);
            Ok(first)
        })
    }

    fn statement(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::If) => self.if_stmt(),
            Some(TokenKind::Repeat) => self.repeat_stmt(),
            Some(TokenKind::Identifier) => self.assign_stmt(),
            Some(TokenKind::Read) => self.read_stmt(),
            Some(TokenKind::Write) => self.write_stmt(),
            _ => Err(self.unexpected("statement")),
        }
    }

    // if_stmt := 'if' exp 'then' stmt_sequence [ 'else' stmt_sequence ] 'end'
    fn if_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        let mut node = SyntaxNode::new(NodeKind::If, start);

        node.push_child(self.exp()?);
        self.expect(TokenKind::Then)?;
        node.push_child(self.stmt_sequence()?);

        if self.check(TokenKind::Else) {
            self.advance()?; // consume 'else'
            node.push_child(self.stmt_sequence()?);
        }

        self.expect(TokenKind::End)?;
        node.set_span(start.to(self.previous));
        Ok(node)
    }

    // repeat_stmt := 'repeat' stmt_sequence 'until' exp
    fn repeat_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.expect(TokenKind::Repeat)?.span;
        let mut node = SyntaxNode::new(NodeKind::Repeat, start);

        node.push_child(self.stmt_sequence()?);
        self.expect(TokenKind::Until)?;
        node.push_child(self.exp()?);

        node.set_span(start.to(self.previous));
        Ok(node)
    }

    // assign_stmt := identifier ':=' exp
    fn assign_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let target = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;

        let mut node = SyntaxNode::new(NodeKind::Assign(target.text), target.span);
        node.push_child(self.exp()?);
        node.set_span(target.span.to(self.previous));
        Ok(node)
    }

    // read_stmt := 'read' identifier
    fn read_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.expect(TokenKind::Read)?.span;
        let name = self.expect(TokenKind::Identifier)?;
        Ok(SyntaxNode::new(NodeKind::Read(name.text), start.to(name.span)))
    }

    // write_stmt := 'write' exp
    fn write_stmt(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.expect(TokenKind::Write)?.span;
        let mut node = SyntaxNode::new(NodeKind::Write, start);
        node.push_child(self.exp()?);
        node.set_span(start.to(self.previous));
        Ok(node)
    }

    // exp := simple_exp [ ('<' | '=') simple_exp ]
    // Сравнение не цепляется: не больше одного на выражение
    fn exp(&mut self) -> Result<SyntaxNode, ParseError> {
        self.nested(|parser| {
            let left = parser.simple_exp()?;

            let op = match parser.peek_kind() {
                Some(TokenKind::Lt) => BinaryOperator::Less,
                Some(TokenKind::Eq) => BinaryOperator::Equal,
                _ => return Ok(left),
            };
            parser.advance()?; // consume operator

            let right = parser.simple_exp()?;
            Ok(SyntaxNode::binary(op, left, right))
        })
    }

    // simple_exp := term { ('+' | '-') term }
    fn simple_exp(&mut self) -> Result<SyntaxNode, ParseError> {
        let base = self.depth;
        let mut left = self.term()?;

        while let Some(kind) = self.peek_kind() {
            let op = match kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            // каждая свёртка добавляет дереву уровень
            self.descend()?;
            self.advance()?; // consume operator
            let right = self.term()?;
            left = SyntaxNode::binary(op, left, right);
        }

        self.depth = base;
        Ok(left)
    }

    // term := factor { ('*' | '/') factor }
    fn term(&mut self) -> Result<SyntaxNode, ParseError> {
        let base = self.depth;
        let mut left = self.factor()?;

        while let Some(kind) = self.peek_kind() {
            let op = match kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };
            // каждая свёртка добавляет дереву уровень
            self.descend()?;
            self.advance()?; // consume operator
            let right = self.factor()?;
            left = SyntaxNode::binary(op, left, right);
        }

        self.depth = base;
        Ok(left)
    }

    // factor := '(' exp ')' | number | identifier
    fn factor(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::LParen) => {
                self.advance()?; // consume '('
                let node = self.exp()?;
                self.expect(TokenKind::RParen)?;
                Ok(node)
            }
            Some(TokenKind::Number) => {
                let token = self.expect(TokenKind::Number)?;
                Ok(SyntaxNode::new(NodeKind::Const(token.text), token.span))
            }
            Some(TokenKind::Identifier) => {
                let token = self.expect(TokenKind::Identifier)?;
                Ok(SyntaxNode::new(NodeKind::Id(token.text), token.span))
            }
            _ => Err(self.unexpected("'(', number or identifier")),
        }
    }

    // Вспомогательные методы

    /// Ограничивает глубину рекурсии для вложенных последовательностей и скобок
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let base = self.depth;
        self.descend()?;
        let result = parse(self);
        self.depth = base;
        result
    }

    /// Один уровень глубины дерева. Бюджет общий для вложенности
    /// и для левых свёрток `+ - * /`, так что высота дерева ограничена.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(|token| token.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Отдаёт текущий токен и подтягивает следующий из сканера.
    /// `Invalid`-лексема сразу становится лексической ошибкой.
    fn advance(&mut self) -> Result<Option<Token>, ParseError> {
        let next = self.scanner.next_token()?;

        if let Some(token) = &next {
            if token.is(TokenKind::Invalid) {
                return Err(invalid_lexeme(token));
            }
        }

        let consumed = std::mem::replace(&mut self.current, next);
        if let Some(token) = &consumed {
            self.previous = token.span;
        }
        Ok(consumed)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if !self.check(expected) {
            return Err(self.unexpected(expected.describe()));
        }
        match self.advance()? {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected.describe())),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(token) => ParseError::Syntax {
                expected: expected.to_string(),
                found: token.to_string(),
                span: token.span,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.scanner.here(),
            },
        }
    }

    fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|token| token.span)
            .unwrap_or_else(|| self.scanner.here())
    }
}

fn invalid_lexeme(token: &Token) -> ParseError {
    let message = if token.text == ":" {
        "expected '=' after ':'".to_string()
    } else {
        format!("unrecognized character '{}'", token.text)
    };
    ParseError::Lexical {
        message,
        span: token.span,
    }
}
