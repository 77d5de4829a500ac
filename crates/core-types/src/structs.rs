use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Lowest note a grade may carry.
pub const MIN_NOTE: Decimal = dec!(0);
/// Highest note a grade may carry.
pub const MAX_NOTE: Decimal = dec!(20);
/// Largest coefficient a subject may carry. Keeps weighted sums far from the
/// `Decimal` range limit.
pub const MAX_COEFFICIENT: Decimal = dec!(1000000);

/// An enrolled student. The `matricule` is the identity key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, deserialize_with = "trimmed")]
    pub matricule: String,
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub last_name: String,
    #[serde(rename = "prenom", default, deserialize_with = "trimmed")]
    pub first_name: String,
    /// The class/level the student currently belongs to.
    #[serde(default, deserialize_with = "trimmed")]
    pub niveau: String,
}

impl Student {
    pub fn new(
        matricule: impl AsRef<str>,
        last_name: impl AsRef<str>,
        first_name: impl AsRef<str>,
        niveau: impl AsRef<str>,
    ) -> Self {
        Self {
            matricule: matricule.as_ref().trim().to_string(),
            last_name: last_name.as_ref().trim().to_string(),
            first_name: first_name.as_ref().trim().to_string(),
            niveau: niveau.as_ref().trim().to_string(),
        }
    }

    /// Checks that every required field is filled in.
    pub fn validate(&self) -> Result<(), CoreError> {
        let record = || format!("student '{}'", self.matricule);
        for (field, value) in [
            ("nom", &self.last_name),
            ("prenom", &self.first_name),
            ("matricule", &self.matricule),
            ("niveau", &self.niveau),
        ] {
            if value.is_empty() {
                return Err(CoreError::MissingField { record: record(), field });
            }
        }
        Ok(())
    }

    /// "Prenom NOM", the way names appear on report cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name.to_uppercase())
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.full_name(), self.matricule, self.niveau)
    }
}

/// A subject offered to one level, weighted by its coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, deserialize_with = "trimmed")]
    pub code: String,
    #[serde(rename = "nom", default, deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default = "default_coefficient")]
    pub coefficient: Decimal,
    #[serde(default, deserialize_with = "trimmed")]
    pub niveau: String,
}

impl Subject {
    pub fn new(
        code: impl AsRef<str>,
        name: impl AsRef<str>,
        coefficient: Decimal,
        niveau: impl AsRef<str>,
    ) -> Self {
        Self {
            code: code.as_ref().trim().to_string(),
            name: name.as_ref().trim().to_string(),
            coefficient,
            niveau: niveau.as_ref().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let record = || format!("subject '{}'", self.code);
        for (field, value) in [
            ("nom", &self.name),
            ("code", &self.code),
            ("niveau", &self.niveau),
        ] {
            if value.is_empty() {
                return Err(CoreError::MissingField { record: record(), field });
            }
        }
        if !self.has_valid_coefficient() {
            return Err(CoreError::InvalidInput(
                record(),
                format!(
                    "coefficient must be greater than 0 and at most {MAX_COEFFICIENT}, got {}",
                    self.coefficient
                ),
            ));
        }
        Ok(())
    }

    pub fn has_valid_coefficient(&self) -> bool {
        self.coefficient > Decimal::ZERO && self.coefficient <= MAX_COEFFICIENT
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Coef: {} - {}",
            self.name, self.code, self.coefficient, self.niveau
        )
    }
}

/// A note obtained by one student in one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    #[serde(rename = "matricule_etudiant", default, deserialize_with = "trimmed")]
    pub matricule: String,
    #[serde(rename = "code_matiere", default, deserialize_with = "trimmed")]
    pub subject_code: String,
    #[serde(default)]
    pub note: Decimal,
    /// Entry date (YYYY-MM-DD). Informational only.
    #[serde(default = "today")]
    pub date: String,
}

impl Grade {
    /// Creates a grade dated today.
    pub fn new(matricule: impl AsRef<str>, subject_code: impl AsRef<str>, note: Decimal) -> Self {
        Self::with_date(matricule, subject_code, note, today())
    }

    pub fn with_date(
        matricule: impl AsRef<str>,
        subject_code: impl AsRef<str>,
        note: Decimal,
        date: impl Into<String>,
    ) -> Self {
        Self {
            matricule: matricule.as_ref().trim().to_string(),
            subject_code: subject_code.as_ref().trim().to_string(),
            note,
            date: date.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let record = || format!("grade ({}, {})", self.matricule, self.subject_code);
        if self.matricule.is_empty() {
            return Err(CoreError::MissingField { record: record(), field: "matricule_etudiant" });
        }
        if self.subject_code.is_empty() {
            return Err(CoreError::MissingField { record: record(), field: "code_matiere" });
        }
        if !self.is_note_in_range() {
            return Err(CoreError::InvalidInput(
                record(),
                format!("note must lie between {MIN_NOTE} and {MAX_NOTE}, got {}", self.note),
            ));
        }
        Ok(())
    }

    pub fn is_note_in_range(&self) -> bool {
        (MIN_NOTE..=MAX_NOTE).contains(&self.note)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Note: {}/20 - Matricule: {} - Matière: {}",
            self.note, self.matricule, self.subject_code
        )
    }
}

fn default_coefficient() -> Decimal {
    Decimal::ONE
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}
