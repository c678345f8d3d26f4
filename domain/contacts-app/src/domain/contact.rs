use validator::Validate;

use crate::domain::{ContactId, RepoCreateError, RepoDeleteError, RepoError, RepoUpdateError};

#[async_trait::async_trait]
pub trait ContactRepository {
    /// Persists a new contact under a freshly assigned id. A duplicate email key must
    /// be rejected by the store itself and reported as `RepoCreateError::Conflict`.
    async fn create_contact(&self, details: ContactDetails) -> Result<Contact, RepoCreateError>;

    /// All contacts in insertion order.
    async fn list_contacts(&self) -> Result<Vec<Contact>, RepoError>;

    async fn find_contact(&self, id: ContactId) -> Result<Option<Contact>, RepoError>;

    /// Writes only the fields present in an already validated `update` and returns
    /// the stored result. Fields the update leaves out are never written, so
    /// concurrent updates of different fields of one contact both survive.
    async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<Contact, RepoUpdateError>;

    async fn delete_contact(&self, id: ContactId) -> Result<(), RepoDeleteError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub details: ContactDetails,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct ContactDetails {
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub company: Option<String>,
    pub job_title: Option<String>,
}

impl ContactDetails {
    /// Trims every field, drops empty optional fields and checks that all required
    /// fields are present.
    pub fn validated(self) -> Result<ContactDetails, ContactValidationError> {
        let details = ContactDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: normalize_optional(self.company),
            job_title: normalize_optional(self.job_title),
        };
        match details.validate() {
            Ok(()) => Ok(details),
            Err(errors) => Err(ContactValidationError::from(errors)),
        }
    }

    pub fn email_key(&self) -> String {
        email_key(&self.email)
    }
}

/// The value the uniqueness constraint is enforced on.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Partial update of a contact. `None` leaves the field untouched; for the optional
/// fields `Some(None)` clears the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct ContactUpdate {
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: Option<String>,
    pub company: Option<Option<String>>,
    pub job_title: Option<Option<String>>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ContactUpdate::default()
    }

    /// Trims the provided fields, turns a blank optional field into a clear and
    /// rejects blank required fields. A stored contact is always valid, so
    /// applying a validated update to it yields a valid contact.
    pub fn validated(self) -> Result<ContactUpdate, ContactValidationError> {
        let required = |value: Option<String>| value.map(|v| v.trim().to_string());
        let update = ContactUpdate {
            first_name: required(self.first_name),
            last_name: required(self.last_name),
            email: required(self.email),
            phone: required(self.phone),
            company: self.company.map(normalize_optional),
            job_title: self.job_title.map(normalize_optional),
        };
        match update.validate() {
            Ok(()) => Ok(update),
            Err(errors) => Err(ContactValidationError::from(errors)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("contact validation failed: {}", .problems.join(", "))]
pub struct ContactValidationError {
    pub problems: Vec<String>,
}

impl From<validator::ValidationErrors> for ContactValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut problems: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        problems.sort();
        Self { problems }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> ContactDetails {
        ContactDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            phone: "555-0100".to_string(),
            company: None,
            job_title: None,
        }
    }

    #[test]
    fn test_validated_trims_fields() {
        let details = ContactDetails {
            first_name: "  Ada ".to_string(),
            email: " Ada@X.com\n".to_string(),
            company: Some("   ".to_string()),
            job_title: Some(" Mathematician ".to_string()),
            ..ada()
        }
        .validated()
        .unwrap();

        assert_eq!(details.first_name, "Ada");
        assert_eq!(details.email, "Ada@X.com");
        assert_eq!(details.company, None);
        assert_eq!(details.job_title.as_deref(), Some("Mathematician"));
    }

    #[test]
    fn test_validated_reports_every_missing_field() {
        let err = ContactDetails {
            first_name: String::new(),
            phone: "   ".to_string(),
            ..ada()
        }
        .validated()
        .unwrap_err();

        assert_eq!(
            err.problems,
            vec![
                "firstName is required".to_string(),
                "phone is required".to_string()
            ]
        );
        assert_eq!(
            err.to_string(),
            "contact validation failed: firstName is required, phone is required"
        );
    }

    #[test]
    fn test_email_key_ignores_case_and_whitespace() {
        assert_eq!(email_key(" Ada@X.COM "), "ada@x.com");
        let details = ContactDetails {
            email: "ADA@x.com".to_string(),
            ..ada()
        };
        assert_eq!(details.email_key(), ada().email_key());
    }

    #[test]
    fn test_update_validation_trims_provided_fields() {
        let update = ContactUpdate {
            email: Some(" Ada@X.com ".to_string()),
            company: Some(Some(" Analytical ".to_string())),
            job_title: Some(Some("   ".to_string())),
            ..Default::default()
        }
        .validated()
        .unwrap();

        assert_eq!(
            update,
            ContactUpdate {
                email: Some("Ada@X.com".to_string()),
                company: Some(Some("Analytical".to_string())),
                job_title: Some(None),
                ..Default::default()
            }
        );
        assert!(!update.is_empty());
        assert!(ContactUpdate::default().validated().unwrap().is_empty());
    }

    #[test]
    fn test_update_cannot_blank_required_field() {
        let err = ContactUpdate {
            last_name: Some(" ".to_string()),
            phone: Some(String::new()),
            first_name: Some("Augusta".to_string()),
            ..Default::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                "lastName is required".to_string(),
                "phone is required".to_string()
            ]
        );
    }
}
