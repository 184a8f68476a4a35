//! # Redis
//!
//! Document store for the contact collection.
//!
//! ## Layout
//!
//! - Hash `persons`: id to JSON-encoded contact. Single-field hash commands
//!   give per-document atomicity, which is all this layer relies on.
//! - Counter `persons:next-id`: INCR-assigned ids, rendered as decimal
//!   strings on the wire. An id that does not parse back is malformatted,
//!   distinct from a well-formed id with no entry behind it.
//!
//! ## Schema
//!
//! Field constraints are enforced here, not by Redis: name of at least 3
//! characters, number of at least 8 in the form `NN-NNNNNN` or `NNN-NNNNN`.
//! Violations surface verbatim in the API's 400 bodies.

use std::{sync::LazyLock, time::Duration};

use async_trait::async_trait;
use persons::{Person, PersonFields};
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use regex::Regex;

use crate::error::ApiError;

const PERSONS_KEY: &str = "persons";
const NEXT_ID_KEY: &str = "persons:next-id";

const NAME_MIN_LENGTH: usize = 3;
const NUMBER_MIN_LENGTH: usize = 8;

static NUMBER_FORMAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2,3}-\d+$").unwrap());

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();

    client
        .get_connection_manager_with_config(config)
        .await
        .unwrap()
}

#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Person>, ApiError>;
    async fn get(&self, id: &str) -> Result<Person, ApiError>;
    async fn create(&self, fields: PersonFields) -> Result<Person, ApiError>;
    async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    async fn count(&self) -> Result<u64, ApiError>;
}

pub struct RedisPersons {
    connection: ConnectionManager,
}

impl RedisPersons {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PersonStore for RedisPersons {
    async fn list(&self) -> Result<Vec<Person>, ApiError> {
        let mut connection = self.connection.clone();

        let records: Vec<String> = connection.hvals(PERSONS_KEY).await?;

        records
            .iter()
            .map(|record| Ok(serde_json::from_str(record)?))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Person, ApiError> {
        let key = parse_id(id)?;
        let mut connection = self.connection.clone();

        let record: Option<String> = connection.hget(PERSONS_KEY, key).await?;

        match record {
            Some(record) => Ok(serde_json::from_str(&record)?),
            None => Err(ApiError::NotFound(id.to_string())),
        }
    }

    async fn create(&self, fields: PersonFields) -> Result<Person, ApiError> {
        validate_fields(&fields)?;

        let mut connection = self.connection.clone();

        let id: u64 = connection.incr(NEXT_ID_KEY, 1).await?;
        let person = Person {
            id: id.to_string(),
            name: fields.name,
            number: fields.number,
        };

        let _: () = connection
            .hset(PERSONS_KEY, id, serde_json::to_string(&person)?)
            .await?;

        Ok(person)
    }

    async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ApiError> {
        let key = parse_id(id)?;
        validate_fields(&fields)?;

        let mut connection = self.connection.clone();

        // Existence check and overwrite are separate commands; a concurrent
        // delete in between loses to this write (last write wins).
        let exists: bool = connection.hexists(PERSONS_KEY, key).await?;
        if !exists {
            return Err(ApiError::NotFound(id.to_string()));
        }

        let person = Person {
            id: id.to_string(),
            name: fields.name,
            number: fields.number,
        };

        let _: () = connection
            .hset(PERSONS_KEY, key, serde_json::to_string(&person)?)
            .await?;

        Ok(person)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let key = parse_id(id)?;
        let mut connection = self.connection.clone();

        let removed: usize = connection.hdel(PERSONS_KEY, key).await?;

        if removed == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError> {
        let mut connection = self.connection.clone();

        let count: u64 = connection.hlen(PERSONS_KEY).await?;

        Ok(count)
    }
}

pub(crate) fn parse_id(id: &str) -> Result<u64, ApiError> {
    id.parse().map_err(|_| ApiError::MalformattedId)
}

pub fn validate_fields(fields: &PersonFields) -> Result<(), ApiError> {
    let mut problems = Vec::new();

    check_name(&fields.name, &mut problems);
    check_number(&fields.number, &mut problems);

    if problems.is_empty() {
        return Ok(());
    }

    Err(ApiError::Validation(format!(
        "Person validation failed: {}",
        problems.join(", ")
    )))
}

fn check_name(name: &str, problems: &mut Vec<String>) {
    if name.is_empty() {
        problems.push("name: Path `name` is required".to_string());
    } else if name.chars().count() < NAME_MIN_LENGTH {
        problems.push(format!(
            "name: Path `name` (`{name}`) is shorter than the minimum allowed length ({NAME_MIN_LENGTH})"
        ));
    }
}

fn check_number(number: &str, problems: &mut Vec<String>) {
    if number.is_empty() {
        problems.push("number: Path `number` is required".to_string());
        return;
    }

    if number.chars().count() < NUMBER_MIN_LENGTH {
        problems.push(format!(
            "number: Path `number` (`{number}`) is shorter than the minimum allowed length ({NUMBER_MIN_LENGTH})"
        ));
    } else if !NUMBER_FORMAT.is_match(number) {
        problems.push(format!("number: `{number}` is not a valid phone number"));
    }
}
