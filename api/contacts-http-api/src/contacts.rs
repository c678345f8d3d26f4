use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use contacts_app::{
    domain::{
        ContactId,
        contact::{Contact, ContactDetails, ContactUpdate},
    },
    workflow::contact::{
        create::CreateContactError, delete::DeleteContactError, list::ListContactsError,
        update::UpdateContactError,
    },
};
use serde::{Deserialize, Deserializer};

use crate::{AppState, error::ApiError};

const CREATE_FAILED: &str = "Failed to add contact";
const LIST_FAILED: &str = "Failed to fetch contacts";
const UPDATE_FAILED: &str = "Failed to update contact";
const DELETE_FAILED: &str = "Failed to delete contact";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonContact {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_title: Option<String>,
}

impl From<Contact> for JsonContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            first_name: contact.details.first_name,
            last_name: contact.details.last_name,
            email: contact.details.email,
            phone: contact.details.phone,
            company: contact.details.company,
            job_title: contact.details.job_title,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonContactInput {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    job_title: Option<String>,
}

impl From<JsonContactInput> for ContactDetails {
    fn from(input: JsonContactInput) -> Self {
        ContactDetails {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
            company: input.company,
            job_title: input.job_title,
        }
    }
}

/// Update body. An absent key leaves the field alone, an explicit `null` clears it.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonContactUpdate {
    #[serde(default, deserialize_with = "present")]
    first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    company: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    job_title: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<JsonContactUpdate> for ContactUpdate {
    fn from(update: JsonContactUpdate) -> Self {
        // a cleared required field becomes empty and fails validation
        let required = |field: Option<Option<String>>| field.map(Option::unwrap_or_default);
        ContactUpdate {
            first_name: required(update.first_name),
            last_name: required(update.last_name),
            email: required(update.email),
            phone: required(update.phone),
            company: update.company,
            job_title: update.job_title,
        }
    }
}

fn parse_contact_id(id: &str, error: &'static str) -> Result<ContactId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::bad_request(error, format!("Invalid contact id '{}': {}", id, e)))
}

pub async fn create_contact(
    State(app_state): State<AppState>,
    payload: Result<Json<JsonContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JsonContact>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::bad_request(CREATE_FAILED, e.body_text()))?;

    let contact = app_state
        .app
        .contact_create_use_case
        .create_contact(input.into())
        .await
        .map_err(|e| match e {
            CreateContactError::Validation(_) | CreateContactError::Conflict(_) => {
                ApiError::bad_request(CREATE_FAILED, e)
            }
            CreateContactError::Storage => ApiError::Internal(CREATE_FAILED),
        })?;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

pub async fn list_contacts(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonContact>>, ApiError> {
    let contacts = app_state
        .app
        .contact_list_use_case
        .list_contacts()
        .await
        .map_err(|ListContactsError::Storage| ApiError::Internal(LIST_FAILED))?;

    Ok(Json(contacts.into_iter().map(JsonContact::from).collect()))
}

pub async fn update_contact(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: Result<Json<JsonContactUpdate>, JsonRejection>,
) -> Result<Json<JsonContact>, ApiError> {
    let id = parse_contact_id(&id, UPDATE_FAILED)?;
    let Json(update) = payload.map_err(|e| ApiError::bad_request(UPDATE_FAILED, e.body_text()))?;

    let contact = app_state
        .app
        .contact_update_use_case
        .update_contact(id, update.into())
        .await
        .map_err(|e| match e {
            UpdateContactError::NotFound(_) => ApiError::NotFound,
            UpdateContactError::Validation(_) | UpdateContactError::Conflict => {
                ApiError::bad_request(UPDATE_FAILED, e)
            }
            UpdateContactError::Storage => ApiError::Internal(UPDATE_FAILED),
        })?;

    Ok(Json(contact.into()))
}

pub async fn delete_contact(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = parse_contact_id(&id, DELETE_FAILED)?;

    app_state
        .app
        .contact_delete_use_case
        .delete_contact(id)
        .await
        .map_err(|e| match e {
            DeleteContactError::NotFound(_) => ApiError::NotFound,
            DeleteContactError::Storage => ApiError::Internal(DELETE_FAILED),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
