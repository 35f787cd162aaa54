use crate::domain::model::Record;
use crate::domain::ports::{ConfigProvider, DataService};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

/// `DataService` over the PostgREST interface of a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.service_url(), config.api_key())
    }

    fn table_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestError>(&body)
            .ok()
            .and_then(|e| e.message)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Err(SiteError::ServiceError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DataService for SupabaseClient {
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>> {
        let url = self.table_url(collection);
        tracing::debug!("Selecting all rows from {}", url);

        let request = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("Accept", "application/json");
        let response = Self::check(self.authorize(request).send().await?).await?;

        let records: Vec<Record> = response.json().await?;
        tracing::debug!("Received {} rows from {}", records.len(), collection);
        Ok(records)
    }

    async fn insert_one(&self, collection: &str, record: Record) -> Result<()> {
        let url = self.table_url(collection);
        tracing::debug!("Inserting one row into {}", url);

        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[record]);
        Self::check(self.authorize(request).send().await?).await?;

        Ok(())
    }
}
