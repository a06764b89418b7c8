//! Record-level validation composed from the sanitizers.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{Field, PatientRecord, present};
use crate::sanitizer::{HtmlSanitizer, Sanitizer, TextFilter};

/// Inclusive upper bound for a valid age.
pub const MAX_AGE: f64 = 150.0;

/// Maximum phone length, in characters.
pub const MAX_PHONE_LEN: usize = 20;

// Deliberately permissive: something@something.something without spaces.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid regex pattern"));

/// A failed check. The `Display` text is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is blank.
    #[error("{0} is required")]
    Required(Field),

    /// The email is not `local@domain.tld` without spaces.
    #[error("Email format is invalid")]
    InvalidEmail,

    /// The age is not a number in `0..=150`.
    #[error("Age must be a number between 0 and 150")]
    InvalidAge,

    /// The phone is longer than [`MAX_PHONE_LEN`] characters.
    #[error("Phone must be at most 20 characters")]
    PhoneTooLong,

    /// Sanitizing the field would change it.
    #[error("{0} contains content that is not allowed")]
    UnsafeContent(Field),
}

/// Outcome of validating one record: every failed check, in check order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// `true` iff no check failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The user-facing messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Validates and cleans [`PatientRecord`]s.
///
/// Checks are independent and cumulative: every failing check adds one
/// error and evaluation always continues. Order: required fields (name,
/// surname, email, consultation reason), email format, age, phone, then
/// content safety of consultation reason, diagnosis and conclusions.
///
/// # Example
///
/// ```
/// use html_guard::{FieldValidator, PatientRecord};
///
/// let record = PatientRecord {
///     name: "Ada".into(),
///     surname: "Lovelace".into(),
///     email: "ada@example.org".into(),
///     consultation_reason: "<p>Headache</p>".into(),
///     ..Default::default()
/// };
/// assert!(FieldValidator::default().validate(&record).is_valid());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldValidator {
    html: HtmlSanitizer,
    text: TextFilter,
}

impl FieldValidator {
    /// Create a validator using the given sanitizers.
    pub fn new(html: HtmlSanitizer, text: TextFilter) -> Self {
        Self { html, text }
    }

    /// Run every check against `record`.
    pub fn validate(&self, record: &PatientRecord) -> ValidationResult {
        let mut errors = Vec::new();

        let required = [
            (Field::Name, record.name.as_str()),
            (Field::Surname, record.surname.as_str()),
            (Field::Email, record.email.as_str()),
            (Field::ConsultationReason, record.consultation_reason.as_str()),
        ];
        for (field, value) in required {
            if present(value).is_none() {
                errors.push(ValidationError::Required(field));
            }
        }

        if let Some(email) = present(&record.email) {
            if !EMAIL.is_match(email) {
                errors.push(ValidationError::InvalidEmail);
            }
        }

        if let Some(age) = record.age.as_deref().and_then(present) {
            if !valid_age(age) {
                errors.push(ValidationError::InvalidAge);
            }
        }

        if let Some(phone) = record.phone.as_deref().and_then(present) {
            if phone.chars().count() > MAX_PHONE_LEN {
                errors.push(ValidationError::PhoneTooLong);
            }
        }

        let rich = [
            (Field::ConsultationReason, Some(record.consultation_reason.as_str())),
            (Field::Diagnosis, record.diagnosis.as_deref()),
            (Field::Conclusions, record.conclusions.as_deref()),
        ];
        for (field, value) in rich {
            if let Some(value) = value.and_then(present) {
                if !self.html.is_safe(value) {
                    errors.push(ValidationError::UnsafeContent(field));
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!("Record failed validation with {} errors", errors.len());
        }
        ValidationResult { errors }
    }

    /// Produce a cleaned copy of `record`: plain fields through the text
    /// filter, rich fields through the markup sanitizer.
    pub fn sanitize_record(&self, record: &PatientRecord) -> PatientRecord {
        let clean = |field: Field, value: &str| self.sanitizer_for(field).sanitize(value);
        let clean_optional =
            |field: Field, value: &Option<String>| value.as_deref().map(|v| clean(field, v));

        PatientRecord {
            name: clean(Field::Name, &record.name),
            surname: clean(Field::Surname, &record.surname),
            email: clean(Field::Email, &record.email),
            age: clean_optional(Field::Age, &record.age),
            phone: clean_optional(Field::Phone, &record.phone),
            consultation_reason: clean(Field::ConsultationReason, &record.consultation_reason),
            diagnosis: clean_optional(Field::Diagnosis, &record.diagnosis),
            conclusions: clean_optional(Field::Conclusions, &record.conclusions),
        }
    }

    fn sanitizer_for(&self, field: Field) -> &dyn Sanitizer {
        if field.is_rich() {
            &self.html
        } else {
            &self.text
        }
    }
}

fn valid_age(age: &str) -> bool {
    age.trim()
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && (0.0..=MAX_AGE).contains(&n))
}
