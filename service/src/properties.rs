use abi::Property;
use async_trait::async_trait;
use serde::Deserialize;

use crate::{ApiClient, Error};

const PROPERTIES: &str = "/properties";

#[async_trait]
pub trait PropertySource: Send + Sync {
    /// all properties of the logged in owner
    async fn list(&self) -> Result<Vec<Property>, Error>;
    async fn get(&self, id: &str) -> Result<Property, Error>;
    async fn create(&self, property: &Property) -> Result<Property, Error>;
    async fn update(&self, id: &str, property: &Property) -> Result<Property, Error>;
    async fn delete(&self, id: &str) -> Result<(), Error>;
}

#[derive(Debug, Deserialize)]
struct PropertyList {
    properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
struct PropertyEnvelope {
    property: Property,
}

#[derive(Debug, Clone)]
pub struct PropertyService {
    client: ApiClient,
}

impl PropertyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PropertySource for PropertyService {
    async fn list(&self) -> Result<Vec<Property>, Error> {
        let list: PropertyList = self.client.get(PROPERTIES, &[]).await?;
        Ok(list.properties)
    }

    async fn get(&self, id: &str) -> Result<Property, Error> {
        let envelope: PropertyEnvelope = self
            .client
            .get(&format!("{}/{}", PROPERTIES, id), &[])
            .await?;
        Ok(envelope.property)
    }

    async fn create(&self, property: &Property) -> Result<Property, Error> {
        let envelope: PropertyEnvelope = self.client.post(PROPERTIES, property).await?;
        Ok(envelope.property)
    }

    async fn update(&self, id: &str, property: &Property) -> Result<Property, Error> {
        let envelope: PropertyEnvelope = self
            .client
            .put(&format!("{}/{}", PROPERTIES, id), property)
            .await?;
        Ok(envelope.property)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client.delete(&format!("{}/{}", PROPERTIES, id)).await
    }
}
