//! Rule-based form validation
//!
//! Applies declarative field rules to a raw input map and returns the
//! cleaned fields plus the first error per failing field.

mod rule;
mod form;

pub use rule::{parse_rules, Rule, RuleParseError, RuleSet};
pub use form::{validate, FieldErrors, FormParams, Validation};
