//! # Dataset Inspection
//!
//! Offline view of a dataset file, same normalization and grading as the server.
//!
//! ## Notes
//! - Output is pretty JSON so it can be diffed against API responses
//! - `stats` grades every row, so it is the slow one on large files
use std::collections::BTreeMap;

use anyhow::{Result, bail};
use bank::{Bank, DisplayRecord, Grade};

pub mod models;

use models::{Command, SearchReport, Stats};

pub fn run(bank: &Bank, command: &Command) -> Result<String> {
    let output = match command {
        Command::Scan { barcode } => match bank.find_by_barcode(barcode) {
            Some(record) => serde_json::to_string_pretty(&record)?,
            None => bail!("Product not found: {}", barcode.trim()),
        },
        Command::Search { query } => {
            let results = bank.search_by_text(query);

            serde_json::to_string_pretty(&SearchReport {
                count: results.len(),
                results,
            })?
        }
        Command::Stats => serde_json::to_string_pretty(&stats(bank))?,
    };

    Ok(output)
}

pub fn stats(bank: &Bank) -> Stats {
    let mut grades: BTreeMap<Grade, usize> =
        Grade::ALL.into_iter().map(|grade| (grade, 0)).collect();

    for food in bank.foods() {
        *grades.entry(DisplayRecord::from(food).grade).or_default() += 1;
    }

    Stats {
        total_items: bank.len(),
        sample_barcodes: bank
            .sample_barcodes()
            .into_iter()
            .map(str::to_string)
            .collect(),
        grades,
    }
}
