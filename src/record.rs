//! The patient record shape read by [`FieldValidator`](crate::FieldValidator).

use std::fmt;

/// A submitted patient record.
///
/// Values are raw form input. Blank values (empty after trimming) count as
/// absent. `consultation_reason`, `diagnosis` and `conclusions` hold rich
/// markup; the rest are plain text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientRecord {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub age: Option<String>,
    pub phone: Option<String>,
    pub consultation_reason: String,
    pub diagnosis: Option<String>,
    pub conclusions: Option<String>,
}

/// Names a field of [`PatientRecord`] in user-facing messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Surname,
    Email,
    Age,
    Phone,
    ConsultationReason,
    Diagnosis,
    Conclusions,
}

impl Field {
    /// Human-readable label, as used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Surname => "Surname",
            Field::Email => "Email",
            Field::Age => "Age",
            Field::Phone => "Phone",
            Field::ConsultationReason => "Consultation reason",
            Field::Diagnosis => "Diagnosis",
            Field::Conclusions => "Conclusions",
        }
    }

    /// Returns `true` for fields that carry rich markup.
    pub fn is_rich(self) -> bool {
        matches!(
            self,
            Field::ConsultationReason | Field::Diagnosis | Field::Conclusions
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value itself if it is non-blank.
pub(crate) fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
