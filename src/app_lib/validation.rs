//! Form validation rules and touched-state tracking shared by the product and
//! auth forms. Rules mirror what the API enforces so invalid input never
//! leaves the client.

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// A rule a field value failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Violation {
    Required,
    MinLength(usize),
    Min(f64),
    Email,
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => formatter.write_str("is required"),
            Violation::MinLength(len) => write!(formatter, "must be at least {len} characters"),
            Violation::Min(min) => write!(formatter, "must be at least {min}"),
            Violation::Email => formatter.write_str("must be a valid email address"),
        }
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Required text with an optional minimum length in characters.
#[must_use]
pub fn check_text(value: &str, min_len: Option<usize>) -> Option<Violation> {
    if value.is_empty() {
        return Some(Violation::Required);
    }
    match min_len {
        Some(min) if value.chars().count() < min => Some(Violation::MinLength(min)),
        _ => None,
    }
}

/// Required email address.
#[must_use]
pub fn check_email(value: &str) -> Option<Violation> {
    if value.is_empty() {
        Some(Violation::Required)
    } else if valid_email(value) {
        None
    } else {
        Some(Violation::Email)
    }
}

/// Required number with an inclusive lower bound.
#[must_use]
pub fn check_min(value: Option<f64>, min: f64) -> Option<Violation> {
    match value {
        None => Some(Violation::Required),
        Some(number) if number.is_nan() || number < min => Some(Violation::Min(min)),
        Some(_) => None,
    }
}

/// Tracks which fields of a form the user has touched. Errors are shown only
/// for touched fields.
#[derive(Clone, Debug)]
pub struct Touched<F: Ord + Copy> {
    fields: BTreeSet<F>,
}

impl<F: Ord + Copy> Default for Touched<F> {
    fn default() -> Self {
        Self {
            fields: BTreeSet::new(),
        }
    }
}

impl<F: Ord + Copy> Touched<F> {
    pub fn touch(&mut self, field: F) {
        self.fields.insert(field);
    }

    pub fn mark_all(&mut self, fields: &[F]) {
        self.fields.extend(fields.iter().copied());
    }

    #[must_use]
    pub fn is_touched(&self, field: F) -> bool {
        self.fields.contains(&field)
    }

    #[must_use]
    pub fn all_touched(&self, fields: &[F]) -> bool {
        fields.iter().all(|field| self.fields.contains(field))
    }
}
