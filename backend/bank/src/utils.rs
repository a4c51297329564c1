use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::foods::{Cell, FoodRecord, Grade};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

const MISSING_TOKENS: [&str; 19] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").unwrap());

pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

/// Numeric-looking barcodes go through float truncation, so `9.78E+14` and `123.0`
/// lose their exponent and decimal artifacts. Anything else is kept trimmed.
pub fn canonical_barcode(raw: &str) -> String {
    let trimmed = raw.trim();

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let whole = value.trunc();

            if whole == 0.0 {
                "0".to_string()
            } else {
                format!("{whole:.0}")
            }
        }
        _ => trimmed.to_string(),
    }
}

/// Display name for a product. Never empty.
pub fn normalize_name(name: &Cell, brand: &Cell) -> String {
    let Cell::Text(raw) = name else {
        return brand_product(brand);
    };

    if raw.trim().is_empty() || raw.eq_ignore_ascii_case("nan") {
        return brand_product(brand);
    }

    let cleaned = strip_list_wrapper(raw)
        .replace("unknown", "")
        .replace("Unknown", "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() < 2 {
        return brand_product(brand);
    }

    title_case(&cleaned.replace('-', " "))
}

fn brand_product(brand: &Cell) -> String {
    match brand {
        Cell::Text(text) if text.is_empty() || text.eq_ignore_ascii_case("nan") => {
            UNKNOWN_PRODUCT.to_string()
        }
        Cell::Missing => UNKNOWN_PRODUCT.to_string(),
        _ => format!("{brand} Product"),
    }
}

// ['...'] exported lists, both delimiters may overlap on very short values
fn strip_list_wrapper(raw: &str) -> &str {
    if !(raw.starts_with("['") && raw.ends_with("']")) {
        return raw;
    }

    if raw.len() < 4 {
        ""
    } else {
        &raw[2..raw.len() - 2]
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest.
pub fn title_case(input: &str) -> String {
    WORD.replace_all(input, |caps: &Captures| {
        let mut letters = caps[0].chars();

        match letters.next() {
            Some(first) => {
                let mut word = titlecase(first);
                word.extend(letters.flat_map(char::to_lowercase));
                word
            }
            None => String::new(),
        }
    })
    .into_owned()
}

// titlecase differs from uppercase only for these special-cased letters
fn titlecase(letter: char) -> String {
    match letter {
        'ß' => "Ss".to_string(),
        'ﬀ' => "Ff".to_string(),
        'ﬁ' => "Fi".to_string(),
        'ﬂ' => "Fl".to_string(),
        'ﬃ' => "Ffi".to_string(),
        'ﬄ' => "Ffl".to_string(),
        'ﬅ' | 'ﬆ' => "St".to_string(),
        'Ǆ' | 'ǅ' | 'ǆ' => "ǅ".to_string(),
        'Ǉ' | 'ǈ' | 'ǉ' => "ǈ".to_string(),
        'Ǌ' | 'ǋ' | 'ǌ' => "ǋ".to_string(),
        'Ǳ' | 'ǲ' | 'ǳ' => "ǲ".to_string(),
        _ => letter.to_uppercase().collect(),
    }
}

/// Existing `a`..`e` grades win. Otherwise sugar and fat decide, and `d` is never inferred.
pub fn infer_grade(record: &FoodRecord) -> Grade {
    if let Some(grade) = record.grade.as_str().and_then(Grade::from_label) {
        return grade;
    }

    match (record.sugar.as_f64(), record.fat.as_f64()) {
        (Some(sugar), Some(fat)) => grade_from_nutrients(sugar, fat),
        _ => Grade::Unknown,
    }
}

pub fn grade_from_nutrients(sugar: f64, fat: f64) -> Grade {
    if sugar > 22.5 || fat > 17.5 {
        Grade::E
    } else if sugar > 10.0 || fat > 10.0 {
        Grade::C
    } else if sugar > 5.0 || fat > 3.0 {
        Grade::B
    } else {
        Grade::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn record(grade: Cell, sugar: Cell, fat: Cell) -> FoodRecord {
        FoodRecord {
            grade,
            sugar,
            fat,
            ..Default::default()
        }
    }

    #[test]
    fn test_barcode_scientific() {
        assert_eq!(canonical_barcode("9.78E+14"), "978000000000000");
        assert_eq!(canonical_barcode("1.2345E+3"), "1234");
    }

    #[test]
    fn test_barcode_decimals() {
        assert_eq!(canonical_barcode("737628064502.0"), "737628064502");
        assert_eq!(canonical_barcode(" 42 "), "42");
        assert_eq!(canonical_barcode("0123"), "123");
        assert_eq!(canonical_barcode("-0.5"), "0");
    }

    #[test]
    fn test_barcode_text() {
        assert_eq!(canonical_barcode("  abc-123 "), "abc-123");
        assert_eq!(canonical_barcode(""), "");
        assert_eq!(canonical_barcode("inf"), "inf");
    }

    #[test]
    fn test_barcode_idempotent() {
        for raw in ["978542272905355", "9.78E+14", "12345678901234567890", "abc"] {
            let once = canonical_barcode(raw);
            assert_eq!(canonical_barcode(&once), once);
        }
    }

    #[test]
    fn test_name_list_format() {
        assert_eq!(normalize_name(&text("['soup']"), &text("Campbell")), "Soup");
        assert_eq!(
            normalize_name(&text("['tomato-basil soup']"), &Cell::Missing),
            "Tomato Basil Soup"
        );
    }

    #[test]
    fn test_name_fallbacks() {
        assert_eq!(normalize_name(&text(""), &text("nan")), UNKNOWN_PRODUCT);
        assert_eq!(normalize_name(&Cell::Missing, &Cell::Missing), UNKNOWN_PRODUCT);
        assert_eq!(normalize_name(&text("   "), &text("Heinz")), "Heinz Product");
        assert_eq!(normalize_name(&text("NaN"), &text("NAN")), UNKNOWN_PRODUCT);
        assert_eq!(normalize_name(&Cell::Number(7.0), &text("Acme")), "Acme Product");
        assert_eq!(normalize_name(&text("['']"), &text("Acme")), "Acme Product");
        assert_eq!(normalize_name(&text("[']"), &Cell::Missing), UNKNOWN_PRODUCT);
    }

    #[test]
    fn test_name_na_markers() {
        for marker in ["#NA", "#N/A N/A", "<NA>"] {
            assert_eq!(normalize_name(&Cell::text(marker), &Cell::text("Heinz")), "Heinz Product");
        }
    }

    #[test]
    fn test_name_unknown_removed() {
        assert_eq!(normalize_name(&text("Unknown"), &text("Kellogg")), "Kellogg Product");
        assert_eq!(normalize_name(&text("unknown x"), &Cell::Missing), UNKNOWN_PRODUCT);
        assert_eq!(normalize_name(&text("granola unknown bar"), &Cell::Missing), "Granola  Bar");
        // only the two listed spellings are removed
        assert_eq!(normalize_name(&text("UNKNOWN"), &Cell::Missing), "Unknown");
    }

    #[test]
    fn test_name_title_case() {
        assert_eq!(normalize_name(&text("PEANUT-butter"), &Cell::Missing), "Peanut Butter");
        assert_eq!(normalize_name(&text("7up zero"), &Cell::Missing), "7Up Zero");
        assert_eq!(title_case("crème brûlée"), "Crème Brûlée");
        assert_eq!(title_case("ßoup"), "Ssoup");
        assert_eq!(title_case("ǆem ǌive"), "ǅem ǋive");
        assert_eq!(title_case("ﬁsh"), "Fish");
    }

    #[test]
    fn test_name_never_empty() {
        let names = ["", " ", "-", "--", "x", "['x']", "unknownUnknown", "['unknown']", "nan"];
        let brands = [Cell::Missing, text(""), text("nan"), text(" "), text("B")];

        for name in names {
            for brand in &brands {
                assert!(!normalize_name(&text(name), brand).is_empty(), "{name:?} {brand:?}");
            }
        }
    }

    #[test]
    fn test_grade_existing_wins() {
        let graded = record(text("D"), Cell::Number(50.0), Cell::Number(50.0));
        assert_eq!(infer_grade(&graded), Grade::D);

        let again = record(text(infer_grade(&graded).as_str()), Cell::Missing, Cell::Missing);
        assert_eq!(infer_grade(&again), Grade::D);
    }

    #[test]
    fn test_grade_inferred() {
        let cases = [
            (Cell::Missing, Cell::Number(25.0), Cell::Number(2.0), Grade::E),
            (Cell::Missing, Cell::Number(3.0), Cell::Number(1.0), Grade::A),
            (text("unknown"), Cell::Number(11.0), Cell::Number(0.0), Grade::C),
            (Cell::Missing, text(" 6 "), Cell::Number(0.0), Grade::B),
        ];

        for (grade, sugar, fat, expected) in cases {
            assert_eq!(infer_grade(&record(grade, sugar, fat)), expected);
        }
    }

    #[test]
    fn test_grade_unparseable() {
        let no_sugar = record(Cell::Missing, Cell::Missing, Cell::Number(1.0));
        assert_eq!(infer_grade(&no_sugar), Grade::Unknown);

        let bad_fat = record(Cell::Missing, Cell::Number(1.0), text("lots"));
        assert_eq!(infer_grade(&bad_fat), Grade::Unknown);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(grade_from_nutrients(22.5, 17.5), Grade::C);
        assert_eq!(grade_from_nutrients(22.6, 0.0), Grade::E);
        assert_eq!(grade_from_nutrients(0.0, 17.6), Grade::E);
        assert_eq!(grade_from_nutrients(10.0, 10.0), Grade::B);
        assert_eq!(grade_from_nutrients(5.0, 3.0), Grade::A);
        assert_eq!(grade_from_nutrients(5.1, 0.0), Grade::B);
    }

    #[test]
    fn test_grade_never_d() {
        for sugar in 0..60 {
            for fat in 0..40 {
                let grade = grade_from_nutrients(sugar as f64 * 0.5, fat as f64 * 0.5);
                assert_ne!(grade, Grade::D);
                assert_ne!(grade, Grade::Unknown);
            }
        }
    }
}
