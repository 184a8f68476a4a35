use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use chrono::Local;
use persons::{Person, PersonFields};

use crate::{error::ApiError, state::AppState};

pub async fn list_persons_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.persons.list().await?))
}

pub async fn get_person_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(state.persons.get(&id).await?))
}

pub async fn create_person_handler(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<PersonFields>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    // Presence is checked before the store is touched; format and length
    // constraints belong to the store schema.
    if fields.name.is_empty() || fields.number.is_empty() {
        return Err(ApiError::MissingField);
    }

    let person = state.persons.create(fields).await?;

    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn update_person_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<PersonFields>,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(state.persons.update(&id, fields).await?))
}

pub async fn delete_person_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.persons.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn info_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let count = state.persons.count().await?;
    let now = Local::now();

    Ok(Html(format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{}</p>",
        now.to_rfc2822()
    )))
}
