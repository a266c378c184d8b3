//! Form validation against a [`RuleSet`]

use std::collections::{BTreeMap, HashMap};

use validator::ValidateEmail;

use super::rule::{Rule, RuleSet};

/// Raw submitted form fields
pub type FormParams = HashMap<String, String>;

/// First error message per failing field, ordered by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Result of validating a form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    /// Submitted fields minus the excluded ones, regardless of validity
    pub clean: FormParams,
    /// First failure per field; passing fields are absent
    pub errors: FieldErrors,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate `params` against `rules`.
///
/// Rules run over the raw params, so excluded fields (confirmations,
/// consent boxes) are still checked even though they never reach `clean`.
pub fn validate(params: &FormParams, rules: &RuleSet, exclude: &[&str]) -> Validation {
    let clean = params
        .iter()
        .filter(|(key, _)| !exclude.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut errors = FieldErrors::new();

    for (field, field_rules) in rules.iter() {
        let value = params.get(field).map(String::as_str);

        if let Some(message) = first_failure(field, value, field_rules, params) {
            errors.insert(field.to_string(), message);
        }
    }

    Validation { clean, errors }
}

fn first_failure(
    field: &str,
    value: Option<&str>,
    rules: &[Rule],
    params: &FormParams,
) -> Option<String> {
    let blank = value.is_none_or(|v| v.trim().is_empty());

    for rule in rules {
        if blank && !rule.applies_to_blank() {
            continue;
        }

        let value = value.unwrap_or_default();

        let passed = match rule {
            Rule::Required => !blank,
            Rule::Email => value.to_string().validate_email(),
            Rule::Min(min) => value.chars().count() >= *min,
            Rule::Same(other) => params.get(other).map(String::as_str) == Some(value),
        };

        if !passed {
            return Some(message_for(rule, field));
        }
    }

    None
}

fn message_for(rule: &Rule, field: &str) -> String {
    let attribute = attribute_name(field);

    match rule {
        Rule::Required => format!("The {} is required", attribute),
        Rule::Email => format!("The {} is not valid email", attribute),
        Rule::Min(min) => format!("The {} minimum is {}", attribute, min),
        Rule::Same(other) => format!("The {} must be same with {}", attribute, other),
    }
}

/// `country_id` -> `Country id`
fn attribute_name(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
