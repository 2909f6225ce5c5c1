use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Ключевые слова
    If, Then, Else, End, Repeat, Until, Read, Write,
    // Операторы
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /
    Eq,            // =
    Lt,            // <
    // Скобки и разделители
    LParen,        // (
    RParen,        // )
    Semi,          // ;
    Assign,        // :=
    // Идентификаторы и литералы
    Identifier,
    Number,
    // Ошибка
    Invalid,
}

impl TokenKind {
    /// Классифицирует лексему целиком: ключевые слова и операторы
    /// по таблице, потом только-буквы, потом только-цифры.
    pub fn classify(text: &str) -> Self {
        if let Some(kind) = Self::keyword(text).or_else(|| Self::symbol(text)) {
            return kind;
        }
        if !text.is_empty() && text.chars().all(is_letter) {
            Self::Identifier
        } else if !text.is_empty() && text.chars().all(is_digit) {
            Self::Number
        } else {
            Self::Invalid
        }
    }

    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "if" => Self::If,
            "then" => Self::Then,
            "else" => Self::Else,
            "end" => Self::End,
            "repeat" => Self::Repeat,
            "until" => Self::Until,
            "read" => Self::Read,
            "write" => Self::Write,
            _ => return None,
        };
        Some(kind)
    }

    pub fn symbol(text: &str) -> Option<Self> {
        let kind = match text {
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Star,
            "/" => Self::Slash,
            "=" => Self::Eq,
            "<" => Self::Lt,
            "(" => Self::LParen,
            ")" => Self::RParen,
            ";" => Self::Semi,
            ":=" => Self::Assign,
            _ => return None,
        };
        Some(kind)
    }

    /// Человекочитаемое имя для сообщений об ошибках
    pub fn describe(&self) -> &'static str {
        match self {
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::End => "'end'",
            Self::Repeat => "'repeat'",
            Self::Until => "'until'",
            Self::Read => "'read'",
            Self::Write => "'write'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Eq => "'='",
            Self::Lt => "'<'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Semi => "';'",
            Self::Assign => "':='",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::Invalid => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        let text = text.into();
        Self {
            kind: TokenKind::classify(&text),
            text,
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::Invalid => {
                write!(f, "{} '{}'", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

// Только ASCII: буквы и цифры без юникодных классов
pub(crate) fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub(crate) fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keywords_and_symbols() {
        assert_eq!(TokenKind::classify("repeat"), TokenKind::Repeat);
        assert_eq!(TokenKind::classify(":="), TokenKind::Assign);
        assert_eq!(TokenKind::classify("*"), TokenKind::Star);
        assert_eq!(TokenKind::classify("until"), TokenKind::Until);
        assert_eq!(TokenKind::classify("untill"), TokenKind::Identifier);
    }

    #[test]
    fn classify_runs() {
        assert_eq!(TokenKind::classify("counter"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify("Then"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify("0042"), TokenKind::Number);
        assert_eq!(TokenKind::classify("x1"), TokenKind::Invalid);
        assert_eq!(TokenKind::classify("!"), TokenKind::Invalid);
        assert_eq!(TokenKind::classify(":"), TokenKind::Invalid);
    }

    #[test]
    fn display_includes_lexeme_for_value_tokens() {
        let token = Token::new("abc", Span::default());
        assert_eq!(token.to_string(), "identifier 'abc'");
        let token = Token::new("then", Span::default());
        assert_eq!(token.to_string(), "'then'");
    }
}
