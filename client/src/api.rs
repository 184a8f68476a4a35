use async_trait::async_trait;
use persons::{Person, PersonFields};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::service::{PersonService, ServiceError};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct RemotePersons {
    client: Client,
    base_url: String,
}

impl RemotePersons {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn persons_url(&self) -> String {
        format!("{}/api/persons", self.base_url)
    }

    async fn rejection(response: Response) -> ServiceError {
        if response.status() == StatusCode::NOT_FOUND {
            return ServiceError::NotFound;
        }

        match response.json::<ErrorBody>().await {
            Ok(body) => ServiceError::Rejected(body.error),
            Err(error) => ServiceError::Transport(error),
        }
    }
}

#[async_trait]
impl PersonService for RemotePersons {
    async fn get_all(&self) -> Result<Vec<Person>, ServiceError> {
        let response = self.client.get(self.persons_url()).send().await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json().await?)
    }

    async fn create(&self, fields: PersonFields) -> Result<Person, ServiceError> {
        let response = self
            .client
            .post(self.persons_url())
            .json(&fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ServiceError> {
        let response = self
            .client
            .put(format!("{}/{id}", self.persons_url()))
            .json(&fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json().await?)
    }

    async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let response = self
            .client
            .delete(format!("{}/{id}", self.persons_url()))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }
}
