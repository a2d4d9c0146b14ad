//! # Dashboard Module
//!
//! Typed entry points for the content-operation dashboard: personas,
//! platform accounts, the content calendar, the job queue and the LoRA
//! training assets. Each operation is a thin call on a [`RecordStore`]; ids
//! are generated here from the clock and optional fields get their defaults.

use crate::backend::auth::ServiceAccount;
use crate::backend::google::GoogleSheetsBackend;
use crate::backend::SheetsBackend;
use crate::config::SheetsConfig;
use crate::database::store::RecordStore;
use crate::error::SheetStoreError;
use chrono::DateTime;
use chrono::Utc;
use std::sync::Arc;

pub mod accounts;
pub mod assets;
pub mod calendar;
pub mod jobs;
pub mod personas;
pub mod progress;
pub mod tables;

/// Record stores for the main and the assets spreadsheet.
pub struct Dashboard<B> {
    /// Personas, profiles, accounts, calendar and job queue
    pub main: RecordStore<B>,
    /// LoRA training images, generated content and assets index
    pub assets: RecordStore<B>,
    clock: fn() -> DateTime<Utc>,
}

impl<B: SheetsBackend> Dashboard<B> {
    pub fn new(main: B, assets: B) -> Self {
        Dashboard {
            main: RecordStore::new(main),
            assets: RecordStore::new(assets),
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for generated ids and dates.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl Dashboard<GoogleSheetsBackend> {
    /// Connects both spreadsheets through one service account.
    pub fn connect(config: &SheetsConfig) -> Result<Self, SheetStoreError> {
        let agent = config.agent();
        let tokens = Arc::new(ServiceAccount::new(
            &config.service_account_email,
            &config.private_key,
            &config.token_url,
            agent.clone(),
        )?);
        let main = GoogleSheetsBackend::new(agent.clone(), &config.api_base_url, &config.spreadsheet_id, tokens.clone())?;
        let assets = GoogleSheetsBackend::new(agent, &config.api_base_url, &config.assets_spreadsheet_id, tokens)?;
        Ok(Dashboard::new(main, assets))
    }
}
