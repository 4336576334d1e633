//! Evaluation of filter expressions against stored users.
//!
//! Evaluation is total: a comparison whose literal does not fit the
//! attribute's type, or whose attribute has no value on the user, is false.

use super::ast::{Attribute, Comparison, Expression, Literal, Operator};
use crate::config::{CaseSensitivity, MatchPolicy};
use crate::resource::User;
use chrono::{DateTime, Utc};

/// A resolved attribute value together with the policy used to compare it.
#[derive(Debug, Clone, Copy)]
enum Value<'a> {
    Text(&'a str, CaseSensitivity),
    Id(&'a str),
    Number(u64),
    Timestamp(DateTime<Utc>),
}

/// Whether `user` satisfies `expression`.
pub fn evaluate(expression: &Expression, user: &User, policy: &MatchPolicy) -> bool {
    match expression {
        Expression::Comparison(comparison) => evaluate_comparison(comparison, user, policy),
        Expression::And(left, right) => {
            evaluate(left, user, policy) && evaluate(right, user, policy)
        }
        Expression::Or(left, right) => {
            evaluate(left, user, policy) || evaluate(right, user, policy)
        }
    }
}

fn evaluate_comparison(comparison: &Comparison, user: &User, policy: &MatchPolicy) -> bool {
    let values = resolve(comparison.attribute, user, policy);

    match (comparison.operator, &comparison.literal) {
        (Operator::Present, _) => values.iter().any(is_present),
        (operator, Some(literal)) => values
            .iter()
            .any(|value| compare(*value, operator, literal)),
        (_, None) => false,
    }
}

fn resolve<'a>(attribute: Attribute, user: &'a User, policy: &MatchPolicy) -> Vec<Value<'a>> {
    match attribute {
        Attribute::Id => vec![Value::Id(user.id().as_str())],
        Attribute::UserName => vec![Value::Text(user.user_name().as_str(), policy.user_name)],
        Attribute::GivenName => user
            .name()
            .and_then(|name| name.given_name())
            .map(|given| Value::Text(given, policy.text))
            .into_iter()
            .collect(),
        Attribute::FamilyName => user
            .name()
            .and_then(|name| name.family_name())
            .map(|family| Value::Text(family, policy.text))
            .into_iter()
            .collect(),
        Attribute::Emails => user
            .emails()
            .iter()
            .map(|email| Value::Text(email.as_str(), policy.text))
            .collect(),
        Attribute::Version => vec![Value::Number(user.version().value())],
        Attribute::Created => vec![Value::Timestamp(user.meta().created())],
        Attribute::LastModified => vec![Value::Timestamp(user.meta().last_modified())],
    }
}

fn is_present(value: &Value<'_>) -> bool {
    match value {
        Value::Text(text, _) | Value::Id(text) => !text.is_empty(),
        Value::Number(_) | Value::Timestamp(_) => true,
    }
}

fn compare(value: Value<'_>, operator: Operator, literal: &Literal) -> bool {
    match (value, operator, literal) {
        // Ids are opaque tokens and always compare exactly
        (Value::Id(id), _, Literal::String(_)) => {
            compare(Value::Text(id, CaseSensitivity::Exact), operator, literal)
        }
        // Sequential ids may be written as bare numbers
        (Value::Id(id), Operator::Equal, Literal::Number(expected)) => id
            .parse::<u64>()
            .is_ok_and(|number| number as f64 == *expected),
        (Value::Text(text, case), Operator::Equal, Literal::String(expected)) => {
            case.equals(text, expected)
        }
        (Value::Text(text, case), Operator::Contains, Literal::String(needle)) => {
            case.contains(text, needle)
        }
        (Value::Text(text, case), Operator::StartsWith, Literal::String(prefix)) => {
            case.starts_with(text, prefix)
        }
        (Value::Number(number), Operator::Equal, Literal::Number(expected)) => {
            number as f64 == *expected
        }
        (Value::Timestamp(timestamp), Operator::Equal, Literal::String(expected)) => {
            DateTime::parse_from_rfc3339(expected)
                .map(|parsed| parsed.with_timezone(&Utc) == timestamp)
                .unwrap_or(false)
        }
        _ => false,
    }
}
