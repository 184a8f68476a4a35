use async_trait::async_trait;
use persons::{Person, PersonFields};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The server rejected the request; carries the `{"error": ...}` body.
    #[error("{0}")]
    Rejected(String),

    #[error("person not found on server")]
    NotFound,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Remote contact service. Everything the phonebook does to the collection
/// goes through here, which is also the seam the tests fake.
#[async_trait]
pub trait PersonService {
    async fn get_all(&self) -> Result<Vec<Person>, ServiceError>;
    async fn create(&self, fields: PersonFields) -> Result<Person, ServiceError>;
    async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ServiceError>;
    async fn remove(&self, id: &str) -> Result<(), ServiceError>;
}
