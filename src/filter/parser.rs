//! Recursive-descent parser for filter expressions.
//!
//! Grammar:
//!
//! ```text
//! expr       = term { "or" term }
//! term       = comparison { "and" comparison }
//! comparison = "(" expr ")" | attribute "pr" | attribute op literal
//! attribute  = ATTRNAME [ "." ATTRNAME ]
//! op         = "eq" | "co" | "sw"
//! literal    = string | number | "true" | "false"
//! ```
//!
//! Keywords, operators and attribute names are case-insensitive. Strings may
//! be single- or double-quoted; a backslash escapes either quote character or
//! another backslash. All error positions are byte offsets into the input.

use super::ast::{Attribute, Comparison, Expression, Literal, Operator};
use crate::error::{ValidationError, ValidationResult};

/// Parse a non-empty filter string into an expression tree.
///
/// Inputs longer than `max_length` bytes, or nesting parentheses deeper than
/// `max_depth`, are rejected before any tree is built for them.
pub fn parse_expression(
    input: &str,
    max_length: usize,
    max_depth: usize,
) -> ValidationResult<Expression> {
    if input.len() > max_length {
        return Err(ValidationError::FilterTooLong {
            length: input.len(),
            max: max_length,
        });
    }

    let mut parser = Parser::new(input, max_depth);
    let expression = parser.parse_or_expr()?;

    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(expression),
        Some(')') => Err(ValidationError::invalid_filter(
            "Unbalanced ')'",
            parser.position,
        )),
        Some(_) => Err(ValidationError::invalid_filter(
            "Unexpected input after expression",
            parser.position,
        )),
    }
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    fn enter_scope(&mut self) -> ValidationResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ValidationError::FilterTooDeep {
                max: self.max_depth,
            });
        }
        Ok(())
    }

    fn exit_scope(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // expr = term { "or" term }
    fn parse_or_expr(&mut self) -> ValidationResult<Expression> {
        let mut left = self.parse_and_expr()?;

        while self.try_keyword("or") {
            let right = self.parse_and_expr()?;
            left = Expression::or(left, right);
        }

        Ok(left)
    }

    // term = comparison { "and" comparison }
    fn parse_and_expr(&mut self) -> ValidationResult<Expression> {
        let mut left = self.parse_comparison()?;

        while self.try_keyword("and") {
            let right = self.parse_comparison()?;
            left = Expression::and(left, right);
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ValidationResult<Expression> {
        self.skip_whitespace();

        match self.peek() {
            None | Some(')') => {
                return Err(ValidationError::EmptyExpression {
                    position: self.position,
                });
            }
            Some('(') => return self.parse_group(),
            Some(c) if c.is_ascii_alphabetic() => {}
            Some(_) => {
                return Err(ValidationError::invalid_filter(
                    "Expected attribute name",
                    self.position,
                ));
            }
        }

        let attribute = self.parse_attribute()?;
        let operator = self.parse_operator()?;

        if operator == Operator::Present {
            return Ok(Comparison::present(attribute).into());
        }

        let literal = self.parse_literal()?;
        Ok(Comparison::new(attribute, operator, literal).into())
    }

    fn parse_group(&mut self) -> ValidationResult<Expression> {
        self.advance();
        self.enter_scope()?;
        let inner = self.parse_or_expr()?;
        self.exit_scope();

        self.skip_whitespace();
        if !self.try_char(')') {
            return Err(ValidationError::invalid_filter(
                "Expected ')' to close grouped expression",
                self.position,
            ));
        }
        Ok(inner)
    }

    fn parse_attribute(&mut self) -> ValidationResult<Attribute> {
        let start = self.position;
        self.consume_attr_name();
        if self.try_char('.') {
            if !self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                return Err(ValidationError::invalid_filter(
                    "Expected sub-attribute name after '.'",
                    self.position,
                ));
            }
            self.consume_attr_name();
        }

        let path = self.slice(start);
        Attribute::resolve(path).ok_or_else(|| ValidationError::UnknownAttribute {
            attribute: path.to_string(),
            position: start,
        })
    }

    fn consume_attr_name(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            self.advance();
        }
    }

    fn parse_operator(&mut self) -> ValidationResult<Operator> {
        self.skip_whitespace();

        let start = self.position;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '\'' | '"' | '(' | ')'))
        {
            self.advance();
        }

        let token = self.slice(start);
        if token.is_empty() {
            return Err(ValidationError::invalid_filter(
                "Expected operator after attribute",
                self.position,
            ));
        }

        Operator::from_keyword(token).ok_or_else(|| ValidationError::UnknownOperator {
            operator: token.to_string(),
            position: start,
        })
    }

    fn parse_literal(&mut self) -> ValidationResult<Literal> {
        self.skip_whitespace();

        match self.peek() {
            Some(quote @ ('\'' | '"')) => self.parse_string(quote),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.parse_number(),
            _ if self.try_keyword("true") => Ok(Literal::Boolean(true)),
            _ if self.try_keyword("false") => Ok(Literal::Boolean(false)),
            _ => Err(ValidationError::invalid_filter(
                "Expected a string, number or boolean value",
                self.position,
            )),
        }
    }

    fn parse_string(&mut self, quote: char) -> ValidationResult<Literal> {
        let start = self.position;
        self.advance();

        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(ValidationError::UnterminatedString { position: start }),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        None => {
                            return Err(ValidationError::UnterminatedString { position: start });
                        }
                        Some(c @ ('\'' | '"' | '\\')) => {
                            value.push(c);
                            self.advance();
                        }
                        Some(_) => {
                            return Err(ValidationError::invalid_filter(
                                "Invalid escape sequence",
                                self.position,
                            ));
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(Literal::String(value))
    }

    fn parse_number(&mut self) -> ValidationResult<Literal> {
        let start = self.position;

        if self.peek().is_some_and(|c| c == '-' || c == '+') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '-' || c == '+') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = self.slice(start);
        text.parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| ValidationError::invalid_filter(format!("Invalid number '{}'", text), start))
    }

    fn slice(&self, start: usize) -> &'a str {
        self.input.get(start..self.position).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position..)?.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.position += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn try_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn try_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();

        let remaining = self.input.get(self.position..).unwrap_or("");
        let Some(candidate) = remaining.get(..keyword.len()) else {
            return false;
        };
        if !candidate.eq_ignore_ascii_case(keyword) {
            return false;
        }

        // Reject keywords that are only the prefix of a longer word
        let next = remaining.get(keyword.len()..).and_then(|rest| rest.chars().next());
        if next.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }

        self.position += keyword.len();
        true
    }
}
