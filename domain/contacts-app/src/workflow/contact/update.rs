use std::sync::Arc;

use crate::domain::{
    ContactId, RepoError, RepoUpdateError,
    contact::{Contact, ContactRepository, ContactUpdate, ContactValidationError},
};

#[async_trait::async_trait]
pub trait UpdateContactUseCase {
    async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<Contact, UpdateContactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateContactError {
    #[error("contact {0} not found")]
    NotFound(ContactId),
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("email is already used by another contact")]
    Conflict,
    #[error("failed to update contact")]
    Storage,
}

pub struct UpdateContactUseCaseImpl<R: ContactRepository> {
    contact_repository: Arc<R>,
}

impl<R: ContactRepository> UpdateContactUseCaseImpl<R> {
    pub fn new(contact_repository: Arc<R>) -> Self {
        Self { contact_repository }
    }
}

impl<R: ContactRepository + Send + Sync + 'static> UpdateContactUseCaseImpl<R> {
    // an unknown id is reported before an invalid body
    async fn rejected_update(
        &self,
        id: ContactId,
        e: ContactValidationError,
    ) -> UpdateContactError {
        match self.contact_repository.find_contact(id).await {
            Ok(Some(_)) => UpdateContactError::Validation(e),
            Ok(None) => UpdateContactError::NotFound(id),
            Err(RepoError::StorageError(e)) => {
                log::error!("Failed to look up contact {}: {}", id, e);
                UpdateContactError::Storage
            }
        }
    }
}

#[async_trait::async_trait]
impl<R: ContactRepository + Send + Sync + 'static> UpdateContactUseCase
    for UpdateContactUseCaseImpl<R>
{
    async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<Contact, UpdateContactError> {
        let update = match update.validated() {
            Ok(update) => update,
            Err(e) => return Err(self.rejected_update(id, e).await),
        };

        let res = self.contact_repository.update_contact(id, update).await;
        match res {
            Ok(contact) => {
                log::info!("Updated contact {}", id);
                Ok(contact)
            }
            Err(RepoUpdateError::NotFound) => Err(UpdateContactError::NotFound(id)),
            Err(RepoUpdateError::Conflict) => Err(UpdateContactError::Conflict),
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!("Failed to update contact {}: {}", id, e);
                Err(UpdateContactError::Storage)
            }
        }
    }
}
