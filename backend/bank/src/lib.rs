use std::{collections::BTreeMap, fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

pub mod error;
pub mod foods;
pub mod utils;

pub use error::LoadError;
pub use foods::{Bank, Cell, DisplayRecord, FoodRecord, Grade};

use utils::{canonical_barcode, is_missing_token};

const BARCODE: &str = "barcode";
const NAME: &str = "name";
const BRAND: &str = "brand";
const SUGAR: &str = "sugar";
const FAT: &str = "fat";
const PROTEIN: &str = "protein";
const CALORIES: &str = "calories";
const GRADE: &str = "grade";
const SOURCE: &str = "source";

const KNOWN_COLUMNS: [&str; 9] = [
    BARCODE, NAME, BRAND, SUGAR, FAT, PROTEIN, CALORIES, GRADE, SOURCE,
];

pub fn get_bank(path: impl AsRef<Path>) -> Result<Bank, LoadError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    read_bank(file)
}

pub fn read_bank<R: io::Read>(reader: R) -> Result<Bank, LoadError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut foods = Vec::new();
    for row in reader.records() {
        foods.push(columns.food(&row?));
    }

    Ok(Bank::new(foods))
}

struct Columns {
    barcode: usize,
    name: Option<usize>,
    brand: Option<usize>,
    sugar: Option<usize>,
    fat: Option<usize>,
    protein: Option<usize>,
    calories: Option<usize>,
    grade: Option<usize>,
    source: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |column: &str| {
            let index = headers.iter().position(|header| header == column);

            if index.is_none() && column != BARCODE {
                warn!("Dataset has no '{column}' column, values will be empty");
            }

            index
        };

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !KNOWN_COLUMNS.contains(header))
            .map(|(index, header)| (index, header.to_string()))
            .collect();

        Ok(Self {
            barcode: find(BARCODE).ok_or(LoadError::MissingColumn(BARCODE))?,
            name: find(NAME),
            brand: find(BRAND),
            sugar: find(SUGAR),
            fat: find(FAT),
            protein: find(PROTEIN),
            calories: find(CALORIES),
            grade: find(GRADE),
            source: find(SOURCE),
            extra,
        })
    }

    fn food(&self, row: &StringRecord) -> FoodRecord {
        let raw = |index: Option<usize>| index.and_then(|i| row.get(i)).unwrap_or("");
        let text = |index: Option<usize>| Cell::text(raw(index));
        let numeric = |index: Option<usize>| Cell::numeric(raw(index));

        let barcode = raw(Some(self.barcode));
        let barcode = if is_missing_token(barcode) {
            String::new()
        } else {
            canonical_barcode(barcode)
        };

        let extra: BTreeMap<String, Cell> = self
            .extra
            .iter()
            .map(|(index, header)| (header.clone(), text(Some(*index))))
            .collect();

        FoodRecord {
            barcode,
            name: text(self.name),
            brand: text(self.brand),
            sugar: numeric(self.sugar),
            fat: numeric(self.fat),
            protein: numeric(self.protein),
            calories: numeric(self.calories),
            grade: text(self.grade),
            source: text(self.source),
            extra,
        }
    }
}
