//! Form validation pipeline
//!
//! A rule set is plain data: an ordered list of fields, each with an ordered
//! list of [`Rule`]s. Running it over submitted form values yields the
//! sanitized values plus every error found, so a form can show all problems
//! at once. Nothing here touches the store.

pub mod rules;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use validator::ValidationError;

pub use rules::Rule;

/// A single field-level problem, shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn from_validation(field: &str, err: ValidationError) -> Self {
        Self {
            field: field.to_string(),
            message: err
                .message
                .map(|m| m.into_owned())
                .unwrap_or_else(|| err.code.into_owned()),
        }
    }
}

/// Raw submitted values keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; absent values are recorded as empty strings.
    pub fn with(mut self, name: &str, value: Option<&str>) -> Self {
        self.values
            .insert(name.to_string(), value.unwrap_or_default().to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Rules for one field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human-readable name used in messages ("First name")
    pub label: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, label, rules }
    }
}

/// Sanitized value of one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedField {
    pub text: String,
    /// Trimmed text before any escaping, for showing back in a form
    pub raw: String,
    pub date: Option<NaiveDate>,
}

/// Result of running a [`RuleSet`]
#[derive(Debug, Clone, Default)]
pub struct Validated {
    fields: HashMap<&'static str, SanitizedField>,
    pub errors: Vec<FieldError>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sanitized text of a field, empty if the field is not in the rule set
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(|f| f.text.as_str()).unwrap_or_default()
    }

    /// Unescaped text of a field, empty if the field is not in the rule set
    pub fn raw(&self, name: &str) -> &str {
        self.fields.get(name).map(|f| f.raw.as_str()).unwrap_or_default()
    }

    /// Parsed date of a field, `None` when absent or invalid
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.fields.get(name).and_then(|f| f.date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldSpec>,
}

impl RuleSet {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn validate(&self, form: &FormFields) -> Validated {
        let mut validated = Validated::default();

        for spec in &self.fields {
            let submitted = form.get(spec.name).unwrap_or_default();
            let mut field = SanitizedField {
                text: submitted.to_string(),
                raw: submitted.to_string(),
                date: None,
            };

            for rule in &spec.rules {
                let checked = match *rule {
                    Rule::Trim => {
                        field.text = field.text.trim().to_string();
                        field.raw = field.raw.trim().to_string();
                        Ok(())
                    }
                    Rule::Length { min, max } => rules::check_length(&field.text, spec.label, min, max),
                    Rule::Escape => {
                        field.text = rules::escape_html(&field.text);
                        Ok(())
                    }
                    Rule::Alphanumeric => rules::check_alphanumeric(&field.text, spec.label),
                    Rule::OptionalIsoDate => rules::check_optional_date(&field.text, spec.label)
                        .map(|date| field.date = date),
                };

                if let Err(err) = checked {
                    validated.errors.push(FieldError::from_validation(spec.name, err));
                }
            }

            validated.fields.insert(spec.name, field);
        }

        validated
    }
}
