use std::sync::Arc;

use crate::domain::{ContactId, RepoDeleteError, contact::ContactRepository};

#[async_trait::async_trait]
pub trait DeleteContactUseCase {
    async fn delete_contact(&self, id: ContactId) -> Result<(), DeleteContactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteContactError {
    #[error("contact {0} not found")]
    NotFound(ContactId),
    #[error("failed to delete contact")]
    Storage,
}

pub struct DeleteContactUseCaseImpl<R: ContactRepository> {
    contact_repository: Arc<R>,
}

impl<R: ContactRepository> DeleteContactUseCaseImpl<R> {
    pub fn new(contact_repository: Arc<R>) -> Self {
        Self { contact_repository }
    }
}

#[async_trait::async_trait]
impl<R: ContactRepository + Send + Sync + 'static> DeleteContactUseCase
    for DeleteContactUseCaseImpl<R>
{
    async fn delete_contact(&self, id: ContactId) -> Result<(), DeleteContactError> {
        match self.contact_repository.delete_contact(id).await {
            Ok(()) => {
                log::info!("Deleted contact {}", id);
                Ok(())
            }
            Err(RepoDeleteError::NotFound) => Err(DeleteContactError::NotFound(id)),
            Err(RepoDeleteError::StorageError(e)) => {
                log::error!("Failed to delete contact {}: {}", id, e);
                Err(DeleteContactError::Storage)
            }
        }
    }
}
