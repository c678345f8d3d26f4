use contacts_app::domain::{
    ContactId, RepoCreateError, RepoDeleteError, RepoError, RepoUpdateError,
    contact::{Contact, ContactDetails, ContactRepository, ContactUpdate, email_key},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionError, TransactionTrait,
};

use crate::entity::contact;

pub struct ContactRepositoryImpl {
    db: DatabaseConnection,
}

impl ContactRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_details(model: &contact::Model) -> ContactDetails {
        ContactDetails {
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            email: model.email.clone(),
            phone: model.phone.clone(),
            company: model.company.clone(),
            job_title: model.job_title.clone(),
        }
    }

    fn model_to_contact(model: contact::Model) -> Result<Contact, String> {
        let id = model
            .contact_id
            .parse::<ContactId>()
            .map_err(|e| format!("invalid contact id '{}': {}", model.contact_id, e))?;
        Ok(Contact {
            id,
            details: Self::model_to_details(&model),
        })
    }

    /// Only the columns named by the update are `Set`.
    fn update_to_active_model(update: ContactUpdate) -> contact::ActiveModel {
        let key = update
            .email
            .as_deref()
            .map_or(NotSet, |email| Set(email_key(email)));
        contact::ActiveModel {
            seq: NotSet,
            contact_id: NotSet,
            first_name: update.first_name.map_or(NotSet, Set),
            last_name: update.last_name.map_or(NotSet, Set),
            email: update.email.map_or(NotSet, Set),
            email_key: key,
            phone: update.phone.map_or(NotSet, Set),
            company: update.company.map_or(NotSet, Set),
            job_title: update.job_title.map_or(NotSet, Set),
        }
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait::async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create_contact(&self, details: ContactDetails) -> Result<Contact, RepoCreateError> {
        let active_model = contact::ActiveModel {
            seq: NotSet,
            contact_id: Set(ContactId::new().to_string()),
            first_name: Set(details.first_name.clone()),
            last_name: Set(details.last_name.clone()),
            email: Set(details.email.clone()),
            email_key: Set(details.email_key()),
            phone: Set(details.phone.clone()),
            company: Set(details.company.clone()),
            job_title: Set(details.job_title.clone()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RepoCreateError::Conflict
            } else {
                RepoCreateError::StorageError(e.to_string())
            }
        })?;
        Self::model_to_contact(model).map_err(RepoCreateError::StorageError)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, RepoError> {
        let models = contact::Entity::find()
            .order_by_asc(contact::Column::Seq)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        models
            .into_iter()
            .map(|model| Self::model_to_contact(model).map_err(RepoError::StorageError))
            .collect()
    }

    async fn find_contact(&self, id: ContactId) -> Result<Option<Contact>, RepoError> {
        let model = contact::Entity::find()
            .filter(contact::Column::ContactId.eq(id.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::StorageError(e.to_string()))?;
        model
            .map(Self::model_to_contact)
            .transpose()
            .map_err(RepoError::StorageError)
    }

    async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<Contact, RepoUpdateError> {
        if update.is_empty() {
            return match self.find_contact(id).await {
                Ok(Some(contact)) => Ok(contact),
                Ok(None) => Err(RepoUpdateError::NotFound),
                Err(RepoError::StorageError(e)) => Err(RepoUpdateError::StorageError(e)),
            };
        }

        let contact_id = id.to_string();
        let res = self
            .db
            .transaction::<_, Option<contact::Model>, RepoUpdateError>(|c| {
                Box::pin(async move {
                    // write before reading so the row lock is taken up front
                    contact::Entity::update_many()
                        .set(Self::update_to_active_model(update))
                        .filter(contact::Column::ContactId.eq(contact_id.as_str()))
                        .exec(c)
                        .await
                        .map_err(|e| {
                            if is_unique_violation(&e) {
                                RepoUpdateError::Conflict
                            } else {
                                RepoUpdateError::StorageError(e.to_string())
                            }
                        })?;

                    contact::Entity::find()
                        .filter(contact::Column::ContactId.eq(contact_id.as_str()))
                        .one(c)
                        .await
                        .map_err(|e| RepoUpdateError::StorageError(e.to_string()))
                })
            })
            .await;
        match res {
            Ok(Some(model)) => Self::model_to_contact(model).map_err(RepoUpdateError::StorageError),
            Ok(None) => Err(RepoUpdateError::NotFound),
            Err(TransactionError::Transaction(e)) => Err(e),
            Err(TransactionError::Connection(e)) => Err(RepoUpdateError::StorageError(e.to_string())),
        }
    }

    async fn delete_contact(&self, id: ContactId) -> Result<(), RepoDeleteError> {
        let res = contact::Entity::delete_many()
            .filter(contact::Column::ContactId.eq(id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoDeleteError::StorageError(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(RepoDeleteError::NotFound);
        }
        Ok(())
    }
}
