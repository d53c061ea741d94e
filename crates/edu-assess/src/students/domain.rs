use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a student by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported programming experience collected at registration.
///
/// Distinct from the measured level: it never overrides the score-based
/// classification, it only filters which recommendations are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredLevel {
    NoExperience,
    Basic,
    Intermediate,
    Advanced,
}

impl DeclaredLevel {
    pub const fn label(self) -> &'static str {
        match self {
            DeclaredLevel::NoExperience => "no experience",
            DeclaredLevel::Basic => "basic",
            DeclaredLevel::Intermediate => "intermediate",
            DeclaredLevel::Advanced => "advanced",
        }
    }
}

/// Education bracket offered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Secondary,
    Undergraduate,
    Postgraduate,
    Other,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::Secondary => "secondary",
            EducationLevel::Undergraduate => "undergraduate",
            EducationLevel::Postgraduate => "postgraduate",
            EducationLevel::Other => "other",
        }
    }
}

/// A registered student. The unique-email constraint is enforced by the
/// repository; everything else beyond field presence is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_level: Option<DeclaredLevel>,
    pub registered_at: DateTime<Utc>,
}

/// Registration payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    #[serde(default)]
    pub declared_level: Option<DeclaredLevel>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    #[serde(default)]
    pub declared_level: Option<DeclaredLevel>,
}

/// Field-level registration failures, mapped to 422 by the router.
#[derive(Debug, thiserror::Error)]
pub enum StudentValidationError {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("age {0} is outside the accepted 16-100 range")]
    AgeOutOfRange(u8),
}

fn validate_name(name: &str) -> Result<(), StudentValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(StudentValidationError::NameTooShort);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), StudentValidationError> {
    let trimmed = email.trim();
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(StudentValidationError::InvalidEmail(trimmed.to_string()));
    }
    Ok(())
}

fn validate_age(age: u8) -> Result<(), StudentValidationError> {
    if !(16..=100).contains(&age) {
        return Err(StudentValidationError::AgeOutOfRange(age));
    }
    Ok(())
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        if let Some(age) = self.age {
            validate_age(age)?;
        }
        Ok(())
    }
}

impl StudentUpdate {
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(age) = self.age {
            validate_age(age)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> NewStudent {
        NewStudent {
            name: "Ana Torres".to_string(),
            email: "ana.torres@example.com".to_string(),
            phone: None,
            age: Some(24),
            education_level: Some(EducationLevel::Undergraduate),
            declared_level: Some(DeclaredLevel::Basic),
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn rejects_single_character_names() {
        let mut new = registration();
        new.name = "A".to_string();
        assert!(matches!(
            new.validate(),
            Err(StudentValidationError::NameTooShort)
        ));
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "ana", "ana@", "@example.com", "ana@nodot", "ana@dot."] {
            let mut new = registration();
            new.email = email.to_string();
            assert!(
                matches!(new.validate(), Err(StudentValidationError::InvalidEmail(_))),
                "expected '{email}' to be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_ages() {
        let mut new = registration();
        new.age = Some(15);
        assert!(matches!(
            new.validate(),
            Err(StudentValidationError::AgeOutOfRange(15))
        ));
        new.age = Some(101);
        assert!(new.validate().is_err());
        new.age = Some(16);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn update_only_validates_present_fields() {
        let update = StudentUpdate::default();
        assert!(update.validate().is_ok());

        let update = StudentUpdate {
            email: Some("broken".to_string()),
            ..StudentUpdate::default()
        };
        assert!(update.validate().is_err());
    }
}
