use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

//
// Match Stockvider EOD JSON
// { "Dataset": { "2016-05-02": { "OPEN": .., "HIGH": .., "LOW": .., "CLOSE": .., ... }, ... } }
//
#[derive(Debug, Deserialize, Clone)]
pub struct EodResponse {
    #[serde(rename = "Dataset")]
    pub dataset: BTreeMap<NaiveDate, EodRow>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EodRow {
    #[serde(rename = "OPEN")]
    pub open: f64,

    #[serde(rename = "HIGH")]
    pub high: f64,

    #[serde(rename = "LOW")]
    pub low: f64,

    #[serde(rename = "CLOSE")]
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Open, Column::High, Column::Low, Column::Close];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Open => "OPEN",
            Column::High => "HIGH",
            Column::Low => "LOW",
            Column::Close => "CLOSE",
        }
    }

    fn pick(&self, row: &EodRow) -> f64 {
        match self {
            Column::Open => row.open,
            Column::High => row.high,
            Column::Low => row.low,
            Column::Close => row.close,
        }
    }
}

/// Price rows indexed by date, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EodTable {
    rows: BTreeMap<NaiveDate, EodRow>,
}

impl EodTable {
    pub fn from_json(body: &str) -> Result<Self> {
        let res: EodResponse =
            serde_json::from_str(body).context("failed to decode Dataset response")?;
        Ok(Self::from(res))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.keys().copied().collect()
    }

    pub fn column(&self, column: Column) -> Vec<f64> {
        self.rows.values().map(|row| column.pick(row)).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.keys().next_back().copied()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&EodRow> {
        self.rows.get(&date)
    }
}

impl From<EodResponse> for EodTable {
    fn from(res: EodResponse) -> Self {
        Self { rows: res.dataset }
    }
}

impl FromIterator<(NaiveDate, EodRow)> for EodTable {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, EodRow)>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
