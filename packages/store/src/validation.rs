//! Per-field input validation.
//!
//! [`validate`] looks up the rule for a field name and runs it on the value.
//! Fields without a rule are always valid. Every rule is total over `&str`;
//! the empty string is an ordinary input whose validity the rule decides.

use std::collections::BTreeMap;

use crate::form::FormDraft;

/// Field name → `true` when the field failed validation.
pub type ErrorMap = BTreeMap<String, bool>;

type Rule = fn(&str) -> bool;

fn rule_for(field: &str) -> Option<Rule> {
    let rule: Rule = match field {
        "email" => email,
        "password" => password,
        "username" => username,
        "first" | "last" => person_name,
        "phone" => phone,
        "bio" => bio,
        "org_name" => org_name,
        "title" => title,
        "description" => description,
        "location" => location,
        _ => return None,
    };
    Some(rule)
}

/// Returns whether `value` is acceptable for `field`.
pub fn validate(field: &str, value: &str) -> bool {
    rule_for(field).map_or(true, |rule| rule(value))
}

/// Validates every field of the draft. The result has one entry per field.
pub fn validate_all(draft: &FormDraft) -> ErrorMap {
    draft
        .iter()
        .map(|(field, value)| (field.to_string(), !validate(field, value)))
        .collect()
}

/// Names of the fields marked invalid, sorted by name.
pub fn invalid_fields(errors: &ErrorMap) -> Vec<String> {
    errors
        .iter()
        .filter(|(_, invalid)| **invalid)
        .map(|(field, _)| field.clone())
        .collect()
}

fn char_len_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

fn email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(_) => !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn password(value: &str) -> bool {
    value.chars().count() >= 7
}

fn username(value: &str) -> bool {
    char_len_between(value, 3, 20)
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn person_name(value: &str) -> bool {
    let trimmed = value.trim();
    char_len_between(trimmed, 1, 50)
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.'))
}

fn phone(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

fn bio(value: &str) -> bool {
    value.chars().count() <= 500
}

fn org_name(value: &str) -> bool {
    char_len_between(value.trim(), 1, 100)
}

fn title(value: &str) -> bool {
    char_len_between(value.trim(), 3, 120)
}

fn description(value: &str) -> bool {
    char_len_between(value.trim(), 1, 2000)
}

fn location(value: &str) -> bool {
    value.chars().count() <= 120
}
