//! # Food Bank
//!
//! RAM database.
//!
//! The whole dataset is read once before the server binds and is never written afterwards.
//!
//! ## Requirements
//!
//! - Lookups by canonical barcode and by name/brand substring
//! - Dataset fits comfortably in memory
//! - Missing dataset must not stop the server, every query answers 503 instead
//!
//! ## Implementation
//!
//! - Flat `Vec` of rows in file order, scanned per query
//! - Shared behind the state `Arc`, no locks since nothing mutates it
use std::path::Path;

use bank::{Bank, get_bank};
use tracing::{error, info};

pub fn init_bank(dataset_path: &Path) -> Option<Bank> {
    info!("Loading dataset from {}", dataset_path.display());

    match get_bank(dataset_path) {
        Ok(bank) => {
            info!("Dataset ready, loaded {} items", bank.len());
            Some(bank)
        }
        Err(e) => {
            error!("Dataset unavailable: {e}");
            None
        }
    }
}
