use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::format_number;

/// Placeholder for a brand or region the survey left blank.
pub const NOT_INFORMED: &str = "Não informada";

/// One CSV row as published by the survey, before any cleaning.
///
/// Columns are matched by header name, so their order in the file does not
/// matter. Every field is optional here; the loader decides what a missing
/// value means.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Regiao - Sigla")]
    pub region: Option<String>,
    #[serde(rename = "Estado - Sigla")]
    pub state: Option<String>,
    #[serde(rename = "Municipio")]
    pub municipality: Option<String>,
    #[serde(rename = "Revenda")]
    pub reseller: Option<String>,
    #[serde(rename = "Produto")]
    pub product: Option<String>,
    #[serde(rename = "Data da Coleta")]
    pub collection_date: Option<String>,
    #[serde(rename = "Valor de Venda")]
    pub sale_price: Option<String>,
    #[serde(rename = "Valor de Compra")]
    pub purchase_price: Option<String>,
    #[serde(rename = "Bandeira")]
    pub brand: Option<String>,
}

/// A cleaned row of the canonical table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region: String,
    pub state: String,
    pub municipality: String,
    pub reseller: String,
    pub product: String,
    /// `None` when the source date did not match `DD/MM/YYYY`.
    pub collection_date: Option<NaiveDate>,
    pub sale_price: f64,
    pub purchase_price: Option<f64>,
    pub brand: String,
}

fn display_price(v: &f64) -> String {
    format_number(*v, 2)
}

fn display_pct(v: &f64) -> String {
    format!("{}%", format_number(*v, 2))
}

/// Mean sale price of one state.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct StateMeanRow {
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "MeanPrice")]
    #[tabled(rename = "MeanPrice", display_with = "display_price")]
    pub mean_price: f64,
}

/// Mean sale price of one (collection date, region) pair.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DateRegionMeanRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "MeanPrice")]
    #[tabled(rename = "MeanPrice", display_with = "display_price")]
    pub mean_price: f64,
}

/// Mean sale price of one brand.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct BrandMeanRow {
    #[serde(rename = "Brand")]
    #[tabled(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "MeanPrice")]
    #[tabled(rename = "MeanPrice", display_with = "display_price")]
    pub mean_price: f64,
}

/// One equal-width sale price bucket.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct HistogramBin {
    #[serde(rename = "Lower")]
    #[tabled(rename = "Lower", display_with = "display_price")]
    pub lower: f64,
    #[serde(rename = "Upper")]
    #[tabled(rename = "Upper", display_with = "display_price")]
    pub upper: f64,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

/// Five-number summary of one brand's sale prices.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct BoxSummaryRow {
    #[serde(rename = "Brand")]
    #[tabled(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Min")]
    #[tabled(rename = "Min", display_with = "display_price")]
    pub min: f64,
    #[serde(rename = "Q1")]
    #[tabled(rename = "Q1", display_with = "display_price")]
    pub q1: f64,
    #[serde(rename = "Median")]
    #[tabled(rename = "Median", display_with = "display_price")]
    pub median: f64,
    #[serde(rename = "Q3")]
    #[tabled(rename = "Q3", display_with = "display_price")]
    pub q3: f64,
    #[serde(rename = "Max")]
    #[tabled(rename = "Max", display_with = "display_price")]
    pub max: f64,
}

/// Number of records of one brand and its share of the filtered total.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct BrandCountRow {
    #[serde(rename = "Brand")]
    #[tabled(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct", display_with = "display_pct")]
    pub share_pct: f64,
}
