//! Statement tokenizer — classifies tokens lazily over a cursor.
//!
//! Nothing is materialized up front: the parser asks for the next token with
//! [`Tokenizer::peek`] and moves past it with [`Tokenizer::consume`].

use crate::model::Operator;

/// Source span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Select, Update, DeleteFrom, InsertInto, From, Set, Where, As,

    // Punctuation
    LParen, RParen, Comma,

    // Operators
    Eq, Neq, Lt, Lte, Gt, Gte,

    // Values
    QuotedLiteral, Identifier,

    /// Unterminated literal, or a tail that starts with no identifier character.
    Invalid,
    Eof,
}

impl TokenKind {
    /// The comparison this token denotes, if it is one.
    pub fn operator(self) -> Option<Operator> {
        match self {
            TokenKind::Eq => Some(Operator::Eq),
            TokenKind::Neq => Some(Operator::Neq),
            TokenKind::Lt => Some(Operator::Lt),
            TokenKind::Lte => Some(Operator::Lte),
            TokenKind::Gt => Some(Operator::Gt),
            TokenKind::Gte => Some(Operator::Gte),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Select => "SELECT",
            TokenKind::Update => "UPDATE",
            TokenKind::DeleteFrom => "DELETE FROM",
            TokenKind::InsertInto => "INSERT INTO",
            TokenKind::From => "FROM",
            TokenKind::Set => "SET",
            TokenKind::Where => "WHERE",
            TokenKind::As => "AS",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Eq => "=",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::QuotedLiteral => "quoted literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Invalid => "invalid token",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// Keywords, punctuation and operators, longest entries first so that the
/// first match is also the longest one (`>=` before `>`). Entries match as
/// prefixes: `FROMt` reads as `FROM` then `t`.
static FIXED_TOKENS: &[(&str, TokenKind)] = &[
    ("DELETE FROM", TokenKind::DeleteFrom),
    ("INSERT INTO", TokenKind::InsertInto),
    ("SELECT", TokenKind::Select),
    ("UPDATE", TokenKind::Update),
    ("WHERE", TokenKind::Where),
    ("FROM", TokenKind::From),
    ("SET", TokenKind::Set),
    (">=", TokenKind::Gte),
    ("<=", TokenKind::Lte),
    ("!=", TokenKind::Neq),
    ("AS", TokenKind::As),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    (",", TokenKind::Comma),
    (">", TokenKind::Gt),
    ("<", TokenKind::Lt),
    ("=", TokenKind::Eq),
];

/// A token from the tokenizer. `text` borrows the input; for quoted literals
/// it is the raw content between the quotes, escapes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    fn eof(at: usize) -> Self {
        Token { kind: TokenKind::Eof, text: "", span: Span::new(at, at) }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

pub fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'*'
}

/// Non-empty, made of identifier characters, and not a fixed token.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(is_identifier_char)
        && !FIXED_TOKENS.iter().any(|(word, _)| s.eq_ignore_ascii_case(word))
}

pub fn is_identifier_or_asterisk(s: &str) -> bool {
    is_identifier(s) || s == "*"
}

/// Cursor over a statement.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// Input text under `span`.
    pub fn source(&self, span: Span) -> &'a str {
        self.input.get(span.start..span.end).unwrap_or("")
    }

    /// Byte offset of the next token.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.cursor..).unwrap_or("")
    }

    /// The next token, without moving the cursor.
    pub fn peek(&self) -> Token<'a> {
        if self.is_at_end() {
            return Token::eof(self.input.len());
        }
        if let Some(tok) = self.peek_fixed() {
            return tok;
        }
        if self.rest().starts_with('\'') {
            let (content, len) = self.peek_quoted();
            let kind = if len == 0 { TokenKind::Invalid } else { TokenKind::QuotedLiteral };
            return Token {
                kind,
                text: content,
                span: Span::new(self.cursor, self.cursor + len),
            };
        }
        self.peek_identifier()
    }

    /// The token `peek` would return; the cursor moves past it and past any
    /// run of plain spaces that follows.
    pub fn consume(&mut self) -> Token<'a> {
        let tok = self.peek();
        self.cursor = tok.span.end.max(self.cursor);
        let skipped = self.rest().bytes().take_while(|&b| b == b' ').count();
        self.cursor += skipped;
        tok
    }

    /// Content of the quoted literal at the cursor and the length of its span,
    /// both quotes included. `("", 0)` when the cursor is not on a quote or the
    /// literal never closes. A quote preceded by a backslash does not close it.
    pub fn peek_quoted(&self) -> (&'a str, usize) {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        if bytes.first() != Some(&b'\'') {
            return ("", 0);
        }
        (1..bytes.len())
            .find(|&i| bytes[i] == b'\'' && bytes[i - 1] != b'\\')
            .map_or(("", 0), |close| (&rest[1..close], close + 1))
    }

    fn peek_fixed(&self) -> Option<Token<'a>> {
        let rest = self.rest();
        FIXED_TOKENS.iter().find_map(|&(word, kind)| {
            let candidate = rest.get(..word.len())?;
            if !candidate.eq_ignore_ascii_case(word) {
                return None;
            }
            Some(Token {
                kind,
                text: candidate,
                span: Span::new(self.cursor, self.cursor + word.len()),
            })
        })
    }

    fn peek_identifier(&self) -> Token<'a> {
        let rest = self.rest();
        let len = rest.bytes().take_while(|&b| is_identifier_char(b)).count();
        if len == 0 {
            return Token {
                kind: TokenKind::Invalid,
                text: rest,
                span: Span::new(self.cursor, self.input.len()),
            };
        }
        Token {
            kind: TokenKind::Identifier,
            text: &rest[..len],
            span: Span::new(self.cursor, self.cursor + len),
        }
    }
}

/// Consumes tokens until the input is exhausted. A zero-length token (an
/// unterminated literal) is yielded once and ends the iteration.
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.is_at_end() {
            return None;
        }
        let tok = self.consume();
        if tok.span.is_empty() {
            self.cursor = self.input.len();
        }
        Some(tok)
    }
}

/// Tokenize a whole statement.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).collect()
}
