//! Declarative field rules
//!
//! Rules are written as pipe-delimited tokens, e.g. `required|min:6`.
//! Supported tokens: `required`, `email`, `min:N`, `same:other_field`.

use std::str::FromStr;

use thiserror::Error;

/// Errors raised while parsing a rule definition
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleParseError {
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    #[error("Rule '{rule}' requires an argument")]
    MissingArgument { rule: String },

    #[error("Rule '{rule}' has an invalid argument: '{argument}'")]
    InvalidArgument { rule: String, argument: String },
}

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present and not blank
    Required,
    /// Field must be a syntactically valid email address
    Email,
    /// Field must have at least N characters
    Min(usize),
    /// Field must equal another field
    Same(String),
}

impl Rule {
    /// Whether the rule is checked against absent or blank values
    pub fn applies_to_blank(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (name, argument) = match token.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (token, None),
        };

        let require_argument = || {
            argument
                .filter(|a| !a.is_empty())
                .ok_or_else(|| RuleParseError::MissingArgument {
                    rule: name.to_string(),
                })
        };

        match name {
            "required" => Ok(Self::Required),
            "email" => Ok(Self::Email),
            "min" => {
                let raw = require_argument()?;
                raw.parse::<usize>()
                    .map(Self::Min)
                    .map_err(|_| RuleParseError::InvalidArgument {
                        rule: name.to_string(),
                        argument: raw.to_string(),
                    })
            }
            "same" => Ok(Self::Same(require_argument()?.to_string())),
            _ => Err(RuleParseError::UnknownRule(token.to_string())),
        }
    }
}

/// Parse a pipe-delimited rule list such as `required|min:6`
pub fn parse_rules(definition: &str) -> Result<Vec<Rule>, RuleParseError> {
    definition
        .split('|')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Ordered mapping of field name to its rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    fields: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    /// Build a rule set from `(field, "rule|rule")` pairs, keeping their order
    pub fn parse<'a, I>(definitions: I) -> Result<Self, RuleParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = Vec::new();

        for (field, definition) in definitions {
            fields.push((field.to_string(), parse_rules(definition)?));
        }

        Ok(Self { fields })
    }

    /// Iterate fields with their rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    /// A copy without the given fields
    pub fn without(&self, excluded: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(field, _)| !excluded.contains(&field.as_str()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_rules() {
        assert_eq!("required".parse::<Rule>(), Ok(Rule::Required));
        assert_eq!("email".parse::<Rule>(), Ok(Rule::Email));
        assert_eq!("min:6".parse::<Rule>(), Ok(Rule::Min(6)));
        assert_eq!(
            "same:password".parse::<Rule>(),
            Ok(Rule::Same("password".to_string()))
        );
    }

    #[test]
    fn test_parse_pipe_delimited() {
        let rules = parse_rules("required|min:6").unwrap();
        assert_eq!(rules, vec![Rule::Required, Rule::Min(6)]);
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let rules = parse_rules("required||email|").unwrap();
        assert_eq!(rules, vec![Rule::Required, Rule::Email]);
    }

    #[test]
    fn test_unknown_rule() {
        assert_eq!(
            "numeric".parse::<Rule>(),
            Err(RuleParseError::UnknownRule("numeric".to_string()))
        );
    }

    #[test]
    fn test_missing_and_invalid_arguments() {
        assert_eq!(
            "min".parse::<Rule>(),
            Err(RuleParseError::MissingArgument {
                rule: "min".to_string()
            })
        );
        assert_eq!(
            "same:".parse::<Rule>(),
            Err(RuleParseError::MissingArgument {
                rule: "same".to_string()
            })
        );
        assert_eq!(
            "min:six".parse::<Rule>(),
            Err(RuleParseError::InvalidArgument {
                rule: "min".to_string(),
                argument: "six".to_string()
            })
        );
    }

    #[test]
    fn test_rule_set_keeps_order_and_excludes() {
        let rules = RuleSet::parse([
            ("email", "required|email"),
            ("password", "required"),
            ("password2", "same:password"),
        ])
        .unwrap();

        let fields: Vec<&str> = rules.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["email", "password", "password2"]);

        let trimmed = rules.without(&["password2"]);
        assert_eq!(trimmed.iter().count(), 2);
        assert!(trimmed.iter().all(|(f, _)| f != "password2"));
    }
}
