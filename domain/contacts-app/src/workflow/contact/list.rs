use std::sync::Arc;

use crate::domain::{
    RepoError,
    contact::{Contact, ContactRepository},
};

#[async_trait::async_trait]
pub trait ListContactsUseCase {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ListContactsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ListContactsError {
    #[error("failed to load contacts")]
    Storage,
}

pub struct ListContactsUseCaseImpl<R: ContactRepository> {
    contact_repository: Arc<R>,
}

impl<R: ContactRepository> ListContactsUseCaseImpl<R> {
    pub fn new(contact_repository: Arc<R>) -> Self {
        Self { contact_repository }
    }
}

#[async_trait::async_trait]
impl<R: ContactRepository + Send + Sync + 'static> ListContactsUseCase
    for ListContactsUseCaseImpl<R>
{
    async fn list_contacts(&self) -> Result<Vec<Contact>, ListContactsError> {
        match self.contact_repository.list_contacts().await {
            Ok(contacts) => Ok(contacts),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error retrieving contacts: {}", e);
                Err(ListContactsError::Storage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::contact::ContactDetails,
        workflow::contact::{
            create::{CreateContactUseCase, CreateContactUseCaseImpl},
            tests::{MockContactRepository, ada},
        },
    };

    #[tokio::test]
    async fn test_list_returns_contacts_in_insertion_order() {
        let repo = Arc::new(MockContactRepository::default());
        let create = CreateContactUseCaseImpl::new(repo.clone());
        let list = ListContactsUseCaseImpl::new(repo.clone());

        assert!(list.list_contacts().await.unwrap().is_empty());

        let mut created = Vec::new();
        for i in 0..5 {
            let contact = create
                .create_contact(ContactDetails {
                    email: format!("user{}@x.com", i),
                    ..ada()
                })
                .await
                .unwrap();
            created.push(contact);
        }

        assert_eq!(list.list_contacts().await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_list_reports_storage_failure() {
        let list = ListContactsUseCaseImpl::new(Arc::new(MockContactRepository::failing()));
        assert!(matches!(
            list.list_contacts().await,
            Err(ListContactsError::Storage)
        ));
    }
}
