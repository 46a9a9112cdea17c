use serde::{Deserialize, Serialize};

/// Content of one spreadsheet cell as delivered by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Render the cell as text. Whole numbers drop the trailing `.0`
    /// so a numeric header `2020` reads back as `"2020"`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

/// Wide input table: one row per region, one column per period.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the column whose header equals `name` exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (row, col); short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// Long-form unit produced by the reshape step (one per region × period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub region_name: String,
    pub region_tier: String,
    pub period_label: String,
    pub value_raw: CellValue,
}

/// Observation after value and year parsing succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedObservation {
    pub region_name: String,
    pub region_tier: String,
    pub year: i32,
    pub value: f64,
}

/// Year-ordered observations of a single region (or the national aggregate).
///
/// Construction goes through [`crate::filter`], which guarantees ascending years
/// without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnnualSeries {
    pub label: String,
    pub points: Vec<CleanedObservation>,
}

impl AnnualSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// (year, value) pairs in series order.
    pub fn pairs(&self) -> Vec<(i32, f64)> {
        self.points.iter().map(|p| (p.year, p.value)).collect()
    }

    /// Tier of the first observation, if any survived cleaning.
    pub fn tier(&self) -> Option<&str> {
        self.points.first().map(|p| p.region_tier.as_str())
    }
}
