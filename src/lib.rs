//! # Sheet Store
//!
//! A record store over Google Sheets for the persona content-operation dashboard.
//! Each sheet is treated as a table whose first row is the header; data rows are
//! exposed as column-name to string records and mutated by key column instead of
//! by physical row.
//!
//! ## Layers
//!
//! - **Backend**: the five primitive range operations (`read_range`, `update_range`,
//!   `append_rows`, `sheet_id`, `delete_rows`) against the Sheets v4 REST API or an
//!   in-memory spreadsheet
//! - **Record store**: list, filter, append, update-by-key and delete-by-key on top
//!   of any backend
//! - **Dashboard**: typed entry points for personas, platform accounts, the content
//!   calendar, the job queue and LoRA training assets
//!
//! ## Configuration
//!
//! [`SheetsConfig::from_env`] reads the service account credentials and spreadsheet
//! ids from the environment; [`Dashboard::connect`] wires both spreadsheets through
//! one cached service-account token.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod spreadsheet;

mod helpers;

pub use crate::backend::SheetsBackend;
pub use crate::config::SheetsConfig;
pub use crate::dashboard::Dashboard;
pub use crate::database::record::Record;
pub use crate::database::record::Updates;
pub use crate::database::store::RecordStore;
pub use crate::error::SheetStoreError;
