use crate::domain::model::Record;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Capability the page needs from the hosted database service.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Every record of `collection`, unfiltered and in service order.
    async fn list_all(&self, collection: &str) -> Result<Vec<Record>>;

    async fn insert_one(&self, collection: &str, record: Record) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn service_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn testimonials_collection(&self) -> &str;
    fn consultation_collection(&self) -> &str;
}
