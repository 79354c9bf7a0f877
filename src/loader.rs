use crate::error::{DataLoadError, LoadWarning};
use crate::table::Table;
use crate::types::{RawRow, Record, NOT_INFORMED};
use crate::util::{non_blank, parse_date_dmy, parse_price};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// Source columns that must be present, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Regiao - Sigla",
    "Estado - Sigla",
    "Municipio",
    "Revenda",
    "Produto",
    "Data da Coleta",
    "Valor de Venda",
    "Bandeira",
];

/// Row warnings kept in a [`LoadReport`]; later ones are only counted.
pub const MAX_KEPT_WARNINGS: usize = 100;

const DELIMITER_CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub unparsed_dates: usize,
    pub delimiter: u8,
    /// The first [`MAX_KEPT_WARNINGS`] row warnings, in file order.
    pub warnings: Vec<LoadWarning>,
}

fn keep_warning(warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
    if warnings.len() < MAX_KEPT_WARNINGS {
        warnings.push(warning);
    }
}

/// Load the survey CSV into the canonical table.
pub fn load(path: impl AsRef<Path>) -> Result<Table, DataLoadError> {
    load_with_report(path).map(|(table, _)| table)
}

/// Load the survey CSV and describe what happened along the way.
pub fn load_with_report(path: impl AsRef<Path>) -> Result<(Table, LoadReport), DataLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let header_line = content.lines().next().unwrap_or("");
    if header_line.trim().is_empty() {
        return Err(DataLoadError::EmptyHeader {
            path: path.to_path_buf(),
        });
    }
    let delimiter = sniff_delimiter(header_line);

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.replace('\u{feff}', "").trim().to_string())
        .collect();
    ensure_required_columns(&headers)?;
    rdr.set_headers(headers.clone());

    let mut total_rows = 0usize;
    let mut unparsed_dates = 0usize;
    let mut warnings: Vec<LoadWarning> = Vec::new();
    let mut records: Vec<Record> = Vec::new();

    for result in rdr.records() {
        total_rows += 1;
        let raw = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                log::warn!("skipping line {}: {}", line, e);
                keep_warning(&mut warnings, LoadWarning::Malformed { line, message: e.to_string() });
                continue;
            }
        };
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let row: RawRow = match raw.deserialize(Some(&headers)) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping line {}: {}", line, e);
                keep_warning(&mut warnings, LoadWarning::Malformed { line, message: e.to_string() });
                continue;
            }
        };

        let sale_price = match parse_price(row.sale_price.as_deref()) {
            Some(v) if v >= 0.0 => v,
            _ => {
                let value = row.sale_price.unwrap_or_default();
                log::warn!("skipping line {}: invalid sale price '{}'", line, value);
                keep_warning(&mut warnings, LoadWarning::InvalidPrice { line, value });
                continue;
            }
        };

        let collection_date = parse_date_dmy(row.collection_date.as_deref());
        if collection_date.is_none() {
            let value = row.collection_date.clone().unwrap_or_default();
            log::debug!("line {}: unparseable collection date '{}'", line, value);
            unparsed_dates += 1;
            keep_warning(&mut warnings, LoadWarning::DateParse { line, value });
        }

        records.push(Record {
            region: non_blank(row.region).unwrap_or_else(|| NOT_INFORMED.to_string()),
            state: non_blank(row.state).unwrap_or_default(),
            municipality: non_blank(row.municipality).unwrap_or_default(),
            reseller: non_blank(row.reseller).unwrap_or_default(),
            product: non_blank(row.product).unwrap_or_default(),
            collection_date,
            sale_price,
            purchase_price: parse_price(row.purchase_price.as_deref()),
            brand: non_blank(row.brand).unwrap_or_else(|| NOT_INFORMED.to_string()),
        });
    }

    let loaded_rows = records.len();
    let report = LoadReport {
        total_rows,
        loaded_rows,
        skipped_rows: total_rows - loaded_rows,
        unparsed_dates,
        delimiter,
        warnings,
    };
    log::info!(
        "loaded {} of {} rows from '{}' (delimiter {:?})",
        report.loaded_rows,
        report.total_rows,
        path.display(),
        delimiter as char
    );
    if unparsed_dates > 0 {
        log::info!("{} rows kept without a usable collection date", unparsed_dates);
    }
    Ok((Table::new(records), report))
}

/// Pick the candidate delimiter that occurs most often in the header line.
///
/// Ties go to the earlier candidate; `;` when none occurs.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let mut best = (DELIMITER_CANDIDATES[0], 0usize);
    for &d in &DELIMITER_CANDIDATES {
        let n = header_line.bytes().filter(|b| *b == d).count();
        if n > best.1 {
            best = (d, n);
        }
    }
    best.0
}

fn ensure_required_columns(headers: &StringRecord) -> Result<(), DataLoadError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataLoadError::MissingColumns(missing))
    }
}
