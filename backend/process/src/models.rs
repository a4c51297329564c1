use std::collections::BTreeMap;

use bank::{DisplayRecord, Grade};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up one product by barcode
    Scan { barcode: String },

    /// Search names and brands
    Search { query: String },

    /// Row count, sample barcodes and grade distribution
    Stats,
}

#[derive(Serialize)]
pub struct SearchReport {
    pub count: usize,
    pub results: Vec<DisplayRecord>,
}

#[derive(Serialize)]
pub struct Stats {
    pub total_items: usize,
    pub sample_barcodes: Vec<String>,
    pub grades: BTreeMap<Grade, usize>,
}
