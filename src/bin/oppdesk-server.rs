//! In-memory development backend for the opportunity REST surface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::sync::RwLock;

use oppdesk::model::{
    DealNeedingAttention, Opportunity, OpportunityFilters, OpportunityInput, OpportunityStats,
    SyncAccepted, SyncStatus,
};

#[path = "oppdesk_server/types.rs"]
mod types;
use self::types::*;
#[path = "oppdesk_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "oppdesk_server/store.rs"]
mod store;
use self::store::*;
#[path = "oppdesk_server/validators.rs"]
mod validators;
use self::validators::*;
#[path = "oppdesk_server/handlers_opportunities.rs"]
mod handlers_opportunities;
use self::handlers_opportunities::*;
#[path = "oppdesk_server/handlers_dashboard.rs"]
mod handlers_dashboard;
use self::handlers_dashboard::*;
#[path = "oppdesk_server/handlers_sync.rs"]
mod handlers_sync;
use self::handlers_sync::*;
#[path = "oppdesk_server/handlers_system.rs"]
mod handlers_system;
use self::handlers_system::*;
#[path = "oppdesk_server/routes.rs"]
mod routes;
#[path = "oppdesk_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
