use std::sync::Arc;

use crate::domain::{
    RepoCreateError,
    contact::{Contact, ContactDetails, ContactRepository, ContactValidationError},
};

#[async_trait::async_trait]
pub trait CreateContactUseCase {
    async fn create_contact(&self, details: ContactDetails) -> Result<Contact, CreateContactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreateContactError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("a contact with email '{0}' already exists")]
    Conflict(String),
    #[error("failed to store contact")]
    Storage,
}

pub struct CreateContactUseCaseImpl<R: ContactRepository> {
    contact_repository: Arc<R>,
}

impl<R: ContactRepository> CreateContactUseCaseImpl<R> {
    pub fn new(contact_repository: Arc<R>) -> Self {
        Self { contact_repository }
    }
}

#[async_trait::async_trait]
impl<R: ContactRepository + Send + Sync + 'static> CreateContactUseCase
    for CreateContactUseCaseImpl<R>
{
    async fn create_contact(&self, details: ContactDetails) -> Result<Contact, CreateContactError> {
        let details = details.validated()?;
        let email = details.email.clone();
        match self.contact_repository.create_contact(details).await {
            Ok(contact) => {
                log::info!("Created contact {}", contact.id);
                Ok(contact)
            }
            Err(RepoCreateError::Conflict) => {
                log::debug!("Rejected contact with duplicate email {}", email);
                Err(CreateContactError::Conflict(email))
            }
            Err(RepoCreateError::StorageError(e)) => {
                log::error!("Failed to create contact: {}", e);
                Err(CreateContactError::Storage)
            }
        }
    }
}
