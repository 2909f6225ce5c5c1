use tracing::trace;

use crate::error::ParseError;
use crate::span::Span;
use super::token::{is_digit, is_letter, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InNum,
    InId,
    InAssign,
    InComment,
    Done,
}

/// Посимвольный сканер TINY. Токены выдаются по одному, по требованию.
///
/// После конца ввода `next_token` всегда возвращает `Ok(None)`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Текущая позиция сканера (пустой span)
    pub fn here(&self) -> Span {
        Span::point(self.line, self.column, self.offset)
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        let mut state = State::Start;
        let mut start = self.here();
        let mut text = String::new();

        loop {
            match state {
                State::Start => {
                    let Some(ch) = self.peek() else {
                        return Ok(None);
                    };
                    match ch {
                        ' ' | '\t' | '\r' | '\n' => {
                            self.bump();
                        }
                        '{' => {
                            start = self.here();
                            self.bump();
                            state = State::InComment;
                        }
                        ':' => {
                            start = self.here();
                            text.push(ch);
                            self.bump();
                            state = State::InAssign;
                        }
                        _ => {
                            start = self.here();
                            text.push(ch);
                            self.bump();
                            state = if is_letter(ch) {
                                State::InId
                            } else if is_digit(ch) {
                                State::InNum
                            } else {
                                State::Done
                            };
                        }
                    }
                }
                State::InNum => {
                    self.eat_while(is_digit, &mut text);
                    state = State::Done;
                }
                State::InId => {
                    self.eat_while(is_letter, &mut text);
                    state = State::Done;
                }
                State::InAssign => {
                    // Только '=' продолжает ':'; иначе ':' остаётся отдельной лексемой
                    if self.peek() == Some('=') {
                        text.push('=');
                        self.bump();
                    }
                    state = State::Done;
                }
                State::InComment => {
                    loop {
                        match self.bump() {
                            Some('}') => break,
                            Some(_) => {}
                            None => {
                                return Err(ParseError::Lexical {
                                    message: "unterminated comment".to_string(),
                                    span: Span::new(start.line, start.column, start.start, self.offset),
                                });
                            }
                        }
                    }
                    state = State::Start;
                }
                State::Done => {
                    let span = Span::new(start.line, start.column, start.start, self.offset);
                    let token = Token::new(text, span);
                    trace!(kind = ?token.kind, text = %token.text, at = %span, "token");
                    return Ok(Some(token));
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat_while(&mut self, accept: fn(char) -> bool, text: &mut String) {
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            text.push(ch);
            self.bump();
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Сканирует весь исходник. `Invalid`-токены попадают в результат,
/// ошибкой считается только незакрытый комментарий.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Scanner::new(source).collect()
}
