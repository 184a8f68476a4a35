//! In-memory store backend driving the HTTP tests without a Redis instance.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use persons::{Person, PersonFields};
use tokio::sync::Mutex;

use crate::{
    database::{PersonStore, parse_id, validate_fields},
    error::ApiError,
};

#[derive(Default)]
pub struct FakePersons {
    records: Mutex<HashMap<u64, Person>>,
    next_id: AtomicU64,
}

#[async_trait]
impl PersonStore for FakePersons {
    async fn list(&self) -> Result<Vec<Person>, ApiError> {
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Person, ApiError> {
        let key = parse_id(id)?;

        self.records
            .lock()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create(&self, fields: PersonFields) -> Result<Person, ApiError> {
        validate_fields(&fields)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let person = Person {
            id: id.to_string(),
            name: fields.name,
            number: fields.number,
        };

        self.records.lock().await.insert(id, person.clone());

        Ok(person)
    }

    async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ApiError> {
        let key = parse_id(id)?;
        validate_fields(&fields)?;

        let mut records = self.records.lock().await;
        if !records.contains_key(&key) {
            return Err(ApiError::NotFound(id.to_string()));
        }

        let person = Person {
            id: id.to_string(),
            name: fields.name,
            number: fields.number,
        };
        records.insert(key, person.clone());

        Ok(person)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let key = parse_id(id)?;

        if self.records.lock().await.remove(&key).is_none() {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.records.lock().await.len() as u64)
    }
}
