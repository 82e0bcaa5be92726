//! Typed access to the opportunity REST backend.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::model::{
    DealNeedingAttention, Opportunity, OpportunityFilters, OpportunityInput, OpportunityStats,
    SyncAccepted, SyncStatus,
};

mod error;
pub use self::error::ApiError;

mod http_client;
mod opportunities;
mod sync;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Opportunity CRUD plus the read-only dashboard endpoints.
pub trait OpportunityApi {
    fn list_opportunities(&self, filters: &OpportunityFilters) -> ApiResult<Vec<Opportunity>>;
    fn get_opportunity(&self, id: &str) -> ApiResult<Opportunity>;
    fn create_opportunity(&self, input: &OpportunityInput) -> ApiResult<Opportunity>;
    fn update_opportunity(&self, id: &str, input: &OpportunityInput) -> ApiResult<Opportunity>;
    fn delete_opportunity(&self, id: &str) -> ApiResult<()>;
    fn stats(&self) -> ApiResult<OpportunityStats>;
    fn deals_needing_attention(&self) -> ApiResult<Vec<DealNeedingAttention>>;
}

/// The two sync endpoints. Split out so the sync panel can be driven on its own.
pub trait SyncApi {
    fn sync_status(&self) -> ApiResult<SyncStatus>;
    fn trigger_sync(&self) -> ApiResult<SyncAccepted>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("oppdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5).min(config.timeout))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
