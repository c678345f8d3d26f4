use std::sync::Arc;

use crate::{
    domain::contact::ContactRepository,
    workflow::contact::{
        create::{CreateContactUseCase, CreateContactUseCaseImpl},
        delete::{DeleteContactUseCase, DeleteContactUseCaseImpl},
        list::{ListContactsUseCase, ListContactsUseCaseImpl},
        update::{UpdateContactUseCase, UpdateContactUseCaseImpl},
    },
};

pub mod domain;
pub mod workflow;

pub struct Application {
    pub contact_create_use_case: Box<dyn CreateContactUseCase + Send + Sync + 'static>,
    pub contact_list_use_case: Box<dyn ListContactsUseCase + Send + Sync + 'static>,
    pub contact_update_use_case: Box<dyn UpdateContactUseCase + Send + Sync + 'static>,
    pub contact_delete_use_case: Box<dyn DeleteContactUseCase + Send + Sync + 'static>,
}

pub fn build_application<R: ContactRepository + Send + Sync + 'static>(
    contact_repository: Arc<R>,
) -> Application {
    Application {
        contact_create_use_case: Box::new(CreateContactUseCaseImpl::new(
            contact_repository.clone(),
        )),
        contact_list_use_case: Box::new(ListContactsUseCaseImpl::new(contact_repository.clone())),
        contact_update_use_case: Box::new(UpdateContactUseCaseImpl::new(
            contact_repository.clone(),
        )),
        contact_delete_use_case: Box::new(DeleteContactUseCaseImpl::new(contact_repository)),
    }
}
