//! Finite-state statement parser.
//!
//! Each [`State`] expects one kind of token and names the state that follows.
//! The parser peeks, checks the expectation, records what it learned in the
//! [`Query`], consumes, and moves on. It never backtracks.
//!
//! Input may end in any state except those that still need a value (a
//! statement keyword, a SELECT field, a table name, or an assignment or
//! comparison value); those fail on the empty end-of-input token.

use tracing::{debug, trace};

use crate::model::{Condition, Conjunction, Query, QueryKind};
use crate::{Error, Result};
use super::lexer::{is_identifier, is_identifier_or_asterisk, Token, TokenKind, Tokenizer};

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Init,
    SelectField,
    SelectComma,
    SelectFrom,
    SelectFromTable,
    DeleteFrom,
    Where,
    WhereField,
    WhereOperator,
    WhereValue,
    WhereCondition,
    Update,
    UpdateSet,
    UpdateField,
    UpdateEquals,
    UpdateValue,
    UpdateComma,
    /// After `INSERT INTO`. Bodies are not parsed.
    InsertBody,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Init => "INIT",
            State::SelectField => "SELECT_FIELD",
            State::SelectComma => "SELECT_COMMA",
            State::SelectFrom => "SELECT_FROM",
            State::SelectFromTable => "SELECT_FROM_TABLE",
            State::DeleteFrom => "DELETE_FROM",
            State::Where => "WHERE",
            State::WhereField => "WHERE_FIELD",
            State::WhereOperator => "WHERE_OPERATOR",
            State::WhereValue => "WHERE_VALUE",
            State::WhereCondition => "WHERE_CONDITION",
            State::Update => "UPDATE",
            State::UpdateSet => "UPDATE_SET",
            State::UpdateField => "UPDATE_FIELD",
            State::UpdateEquals => "UPDATE_EQUALS",
            State::UpdateValue => "UPDATE_VALUE",
            State::UpdateComma => "UPDATE_COMMA",
            State::InsertBody => "INSERT_BODY",
        }
    }

    /// States that still run against the end-of-input token, and so reject it.
    pub fn requires_token(self) -> bool {
        matches!(self,
            State::Init | State::SelectField | State::SelectFromTable |
            State::DeleteFrom | State::Update | State::UpdateValue | State::WhereValue
        )
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parser state — wraps a tokenizer and the query being built.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    state: State,
    query: Query,
    /// Column of the assignment in progress (UPDATE_FIELD → UPDATE_VALUE).
    column: Option<String>,
    /// Comparison in progress (WHERE_FIELD → WHERE_VALUE).
    condition: Option<Condition>,
    /// AND/OR read after the last committed condition.
    conjunction: Option<Conjunction>,
}

impl<'a> Parser<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(sql),
            state: State::Init,
            query: Query::new(),
            column: None,
            condition: None,
            conjunction: None,
        }
    }

    /// Run the state machine to the end of the input.
    pub fn parse(mut self) -> Result<Query> {
        while !self.tokens.is_at_end() || self.state.requires_token() {
            if let Err(err) = self.step() {
                debug!(state = %self.state, position = self.tokens.cursor(), "parse failed");
                return Err(err);
            }
        }

        debug!(
            kind = %self.query.kind,
            table = %self.query.table,
            fields = self.query.fields.len(),
            updates = self.query.updates.len(),
            conditions = self.query.conditions.len(),
            "parsed statement"
        );
        Ok(self.query)
    }

    fn step(&mut self) -> Result<()> {
        let tok = self.tokens.peek();
        trace!(state = %self.state, token = tok.text, position = tok.span.start, "parser step");

        self.state = match self.state {
            State::Init => {
                let (kind, next) = match tok.kind {
                    TokenKind::Select => (QueryKind::Select, State::SelectField),
                    TokenKind::InsertInto => (QueryKind::Insert, State::InsertBody),
                    TokenKind::Update => (QueryKind::Update, State::Update),
                    TokenKind::DeleteFrom => (QueryKind::Delete, State::DeleteFrom),
                    _ => return Err(self.error(&tok, format!("invalid query type '{}'", self.found(&tok)))),
                };
                self.query.kind = kind;
                self.tokens.consume();
                next
            }

            State::SelectField => {
                if tok.kind != TokenKind::Identifier || !is_identifier_or_asterisk(tok.text) {
                    return Err(self.error(&tok, format!("expected a field, found '{}'", self.found(&tok))));
                }
                let field = tok.text.to_owned();
                self.query.fields.push(field.clone());
                self.tokens.consume();

                if self.tokens.peek().kind == TokenKind::As {
                    self.tokens.consume();
                    let alias = self.tokens.peek();
                    if !is_name(&alias) {
                        return Err(self.error(&alias, format!(
                            "expected field alias for '{field}', found '{}'", self.found(&alias)
                        )));
                    }
                    self.query.aliases.insert(field, alias.text.to_owned());
                    self.tokens.consume();
                }

                if self.tokens.peek().kind == TokenKind::From {
                    State::SelectFrom
                } else {
                    State::SelectComma
                }
            }

            State::SelectComma => {
                self.expect(&tok, TokenKind::Comma, "a comma")?;
                State::SelectField
            }

            State::SelectFrom => {
                self.expect(&tok, TokenKind::From, "FROM")?;
                State::SelectFromTable
            }

            State::SelectFromTable => {
                self.table(&tok)?;
                State::Where
            }

            State::DeleteFrom => {
                self.table(&tok)?;
                State::Where
            }

            State::Update => {
                self.table(&tok)?;
                State::UpdateSet
            }

            State::UpdateSet => {
                self.expect(&tok, TokenKind::Set, "SET")?;
                State::UpdateField
            }

            State::UpdateField => {
                if !is_name(&tok) {
                    return Err(self.error(&tok, format!("expected a column, found '{}'", self.found(&tok))));
                }
                self.column = Some(tok.text.to_owned());
                self.tokens.consume();
                State::UpdateEquals
            }

            State::UpdateEquals => {
                self.expect(&tok, TokenKind::Eq, "'='")?;
                State::UpdateValue
            }

            State::UpdateValue => {
                let (value, _) = self.value(&tok)?;
                let Some(column) = self.column.take() else {
                    return Err(self.error(&tok, "assignment value without a column".into()));
                };
                self.query.updates.insert(column, value.to_owned());
                self.tokens.consume();

                if self.tokens.peek().kind == TokenKind::Where {
                    State::Where
                } else {
                    State::UpdateComma
                }
            }

            State::UpdateComma => {
                self.expect(&tok, TokenKind::Comma, "a comma")?;
                State::UpdateField
            }

            State::Where => {
                self.expect(&tok, TokenKind::Where, "a WHERE clause")?;
                State::WhereField
            }

            State::WhereField => {
                if !is_name(&tok) {
                    return Err(self.error(&tok, format!("expected a field, found '{}'", self.found(&tok))));
                }
                let mut condition = Condition::new(tok.text);
                condition.conjunction = self.conjunction.take();
                self.condition = Some(condition);
                self.tokens.consume();
                State::WhereOperator
            }

            State::WhereOperator => {
                let Some(op) = tok.kind.operator() else {
                    return Err(self.error(&tok, format!("expected an operator, found '{}'", self.found(&tok))));
                };
                let Some(condition) = self.condition.as_mut() else {
                    return Err(self.error(&tok, "operator without a field".into()));
                };
                condition.operator = op;
                self.tokens.consume();
                State::WhereValue
            }

            State::WhereValue => {
                let (value, is_field) = self.value(&tok)?;
                let Some(mut condition) = self.condition.take() else {
                    return Err(self.error(&tok, "value without a field".into()));
                };
                condition.right = value.to_owned();
                condition.right_is_field = is_field;
                self.query.conditions.push(condition);
                self.tokens.consume();
                State::WhereCondition
            }

            State::WhereCondition => {
                let conjunction = (tok.kind == TokenKind::Identifier)
                    .then(|| Conjunction::from_keyword(tok.text))
                    .flatten();
                let Some(conjunction) = conjunction else {
                    return Err(self.error(&tok, format!("expected AND/OR, found '{}'", self.found(&tok))));
                };
                self.conjunction = Some(conjunction);
                self.tokens.consume();
                State::WhereField
            }

            State::InsertBody => {
                return Err(self.error(&tok, format!(
                    "INSERT statements are recognized but their body is not supported, found '{}'",
                    self.found(&tok)
                )));
            }
        };
        Ok(())
    }

    /// Consume `tok` if it has the expected kind.
    fn expect(&mut self, tok: &Token<'a>, kind: TokenKind, what: &str) -> Result<()> {
        if tok.kind != kind {
            return Err(self.error(tok, format!("expected {what}, found '{}'", self.found(tok))));
        }
        self.tokens.consume();
        Ok(())
    }

    fn table(&mut self, tok: &Token<'a>) -> Result<()> {
        if !is_name(tok) {
            return Err(self.error(tok, format!("expected a table name, found '{}'", self.found(tok))));
        }
        self.query.table = tok.text.to_owned();
        self.tokens.consume();
        Ok(())
    }

    /// A field reference or a quoted literal. The flag is true for fields.
    fn value(&self, tok: &Token<'a>) -> Result<(&'a str, bool)> {
        match tok.kind {
            TokenKind::Identifier if is_identifier(tok.text) => Ok((tok.text, true)),
            TokenKind::QuotedLiteral => Ok((tok.text, false)),
            TokenKind::Invalid if tok.span.is_empty() => {
                Err(self.error(tok, "expected a quoted value, found an unterminated literal".into()))
            }
            _ => Err(self.error(tok, format!("expected a field or quoted value, found '{}'", self.found(tok)))),
        }
    }

    /// Source text of a token, quotes included for literals.
    fn found(&self, tok: &Token<'_>) -> &'a str {
        self.tokens.source(tok.span)
    }

    fn error(&self, tok: &Token<'_>, message: String) -> Error {
        Error::Parse {
            state: self.state,
            position: tok.span.start,
            found: self.found(tok).to_owned(),
            message,
        }
    }
}

fn is_name(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Identifier && is_identifier(tok.text)
}

/// Parse a single statement.
pub fn parse_statement(sql: &str) -> Result<Query> {
    Parser::new(sql).parse()
}
