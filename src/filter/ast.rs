//! Predicate tree produced by the filter parser.
//!
//! The tree is a closed set of three node kinds: a [`Comparison`] leaf and the
//! binary [`Expression::And`] / [`Expression::Or`] connectives. Parenthesised
//! input produces the same nodes; grouping only changes the tree's shape.

use std::fmt;

/// Attributes a filter may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Id,
    UserName,
    GivenName,
    FamilyName,
    Emails,
    Version,
    Created,
    LastModified,
}

impl Attribute {
    /// Resolve a (possibly dotted) attribute path, ignoring ASCII case.
    pub fn resolve(path: &str) -> Option<Self> {
        let attribute = match path.to_ascii_lowercase().as_str() {
            "id" => Attribute::Id,
            "username" => Attribute::UserName,
            "name.givenname" => Attribute::GivenName,
            "name.familyname" => Attribute::FamilyName,
            "emails" | "emails.value" => Attribute::Emails,
            "version" | "meta.version" => Attribute::Version,
            "meta.created" => Attribute::Created,
            "meta.lastmodified" => Attribute::LastModified,
            _ => return None,
        };
        Some(attribute)
    }

    /// Canonical path of the attribute.
    pub fn path(&self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::UserName => "userName",
            Attribute::GivenName => "name.givenName",
            Attribute::FamilyName => "name.familyName",
            Attribute::Emails => "emails",
            Attribute::Version => "meta.version",
            Attribute::Created => "meta.created",
            Attribute::LastModified => "meta.lastModified",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `eq`
    Equal,
    /// `co`
    Contains,
    /// `sw`
    StartsWith,
    /// `pr`, takes no literal
    Present,
}

impl Operator {
    /// Parse an operator keyword, ignoring ASCII case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "eq" => Some(Operator::Equal),
            "co" => Some(Operator::Contains),
            "sw" => Some(Operator::StartsWith),
            "pr" => Some(Operator::Present),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::Equal => "eq",
            Operator::Contains => "co",
            Operator::StartsWith => "sw",
            Operator::Present => "pr",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Literal operand of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A single `attribute operator literal` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub attribute: Attribute,
    pub operator: Operator,
    /// `None` only for [`Operator::Present`]
    pub literal: Option<Literal>,
}

impl Comparison {
    pub fn new(attribute: Attribute, operator: Operator, literal: Literal) -> Self {
        Self {
            attribute,
            operator,
            literal: Some(literal),
        }
    }

    pub fn present(attribute: Attribute) -> Self {
        Self {
            attribute,
            operator: Operator::Present,
            literal: None,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.attribute, self.operator, literal),
            None => write!(f, "{} {}", self.attribute, self.operator),
        }
    }
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Comparison(Comparison),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or(Box::new(left), Box::new(right))
    }
}

impl From<Comparison> for Expression {
    fn from(comparison: Comparison) -> Self {
        Expression::Comparison(comparison)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison(comparison) => write!(f, "{}", comparison),
            Expression::And(left, right) => write!(f, "({} and {})", left, right),
            Expression::Or(left, right) => write!(f, "({} or {})", left, right),
        }
    }
}
