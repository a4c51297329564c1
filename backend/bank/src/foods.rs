//! # Food Records
//!
//! In-memory food table loaded once from the dataset file.
//!
//! ## Lifecycle
//!
//! - [`Bank`] is built once at startup and never mutated afterwards
//! - Raw [`FoodRecord`]s are kept exactly as loaded
//! - Every query derives a fresh [`DisplayRecord`], nothing derived is stored
//!
//! ## Cells
//!
//! Dataset cells are tagged as [`Cell::Missing`], [`Cell::Text`] or [`Cell::Number`].
//! Missing cells serialize as an empty string so clients never see nulls.
use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};

use crate::utils::{infer_grade, is_missing_token, normalize_name};

pub const SEARCH_LIMIT: usize = 10;
pub const SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Text column cell, empty and NA markers become [`Cell::Missing`].
    pub fn text(raw: &str) -> Self {
        if is_missing_token(raw) {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Nutrient column cell, kept as text when it does not parse so grading can degrade later.
    pub fn numeric(raw: &str) -> Self {
        if is_missing_token(raw) {
            return Cell::Missing;
        }

        match raw.trim().parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// String view used for matching. Missing reads as the empty placeholder.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Missing => Some(""),
            Cell::Text(text) => Some(text),
            Cell::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Missing => None,
            Cell::Text(text) => text.trim().parse().ok(),
            Cell::Number(value) => Some(*value),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(text) => write!(f, "{text}"),
            Cell::Number(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => serializer.serialize_str(""),
            Cell::Text(text) => serializer.serialize_str(text),
            Cell::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    Unknown,
}

impl Grade {
    pub const ALL: [Grade; 6] = [
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::Unknown,
    ];

    /// Case-insensitive `a`..`e`. Anything else, `unknown` included, is not a label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "a" => Some(Grade::A),
            "b" => Some(Grade::B),
            "c" => Some(Grade::C),
            "d" => Some(Grade::D),
            "e" => Some(Grade::E),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "a",
            Grade::B => "b",
            Grade::C => "c",
            Grade::D => "d",
            Grade::E => "e",
            Grade::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset row as loaded. `barcode` is already canonical.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodRecord {
    pub barcode: String,
    pub name: Cell,
    pub brand: Cell,
    pub sugar: Cell,
    pub fat: Cell,
    pub protein: Cell,
    pub calories: Cell,
    pub grade: Cell,
    pub source: Cell,
    pub extra: BTreeMap<String, Cell>,
}

/// Per-query view of a [`FoodRecord`] with a readable name and a settled grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub barcode: String,
    pub name: String,
    pub brand: Cell,
    pub sugar: Cell,
    pub fat: Cell,
    pub protein: Cell,
    pub calories: Cell,
    pub grade: Grade,
    pub source: Cell,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Cell>,
}

impl From<&FoodRecord> for DisplayRecord {
    fn from(record: &FoodRecord) -> Self {
        Self {
            barcode: record.barcode.clone(),
            name: normalize_name(&record.name, &record.brand),
            brand: record.brand.clone(),
            sugar: record.sugar.clone(),
            fat: record.fat.clone(),
            protein: record.protein.clone(),
            calories: record.calories.clone(),
            grade: infer_grade(record),
            source: record.source.clone(),
            extra: record.extra.clone(),
        }
    }
}

/// Read-only food table. Sequential, barcodes are not unique keys.
#[derive(Debug, Clone, Default)]
pub struct Bank {
    foods: Vec<FoodRecord>,
}

impl Bank {
    pub fn new(foods: Vec<FoodRecord>) -> Self {
        Self { foods }
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    /// First row in table order whose canonical barcode equals the trimmed input.
    pub fn find_by_barcode(&self, code: &str) -> Option<DisplayRecord> {
        let code = code.trim();

        self.foods
            .iter()
            .find(|food| food.barcode == code)
            .map(DisplayRecord::from)
    }

    /// Case-insensitive substring match on name or brand, capped at [`SEARCH_LIMIT`].
    ///
    /// An empty query is a substring of every text cell, so it returns the first rows of the table.
    pub fn search_by_text(&self, query: &str) -> Vec<DisplayRecord> {
        let needle = query.to_lowercase();

        self.foods
            .iter()
            .filter(|food| contains(&food.name, &needle) || contains(&food.brand, &needle))
            .take(SEARCH_LIMIT)
            .map(DisplayRecord::from)
            .collect()
    }

    pub fn sample_barcodes(&self) -> Vec<&str> {
        self.foods
            .iter()
            .take(SAMPLE_SIZE)
            .map(|food| food.barcode.as_str())
            .collect()
    }
}

// numbers never match, the same way a non-string cell is skipped by a text filter
fn contains(cell: &Cell, needle: &str) -> bool {
    cell.as_str()
        .is_some_and(|text| text.to_lowercase().contains(needle))
}
