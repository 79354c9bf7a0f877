use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::filter::Selection;

/// Fuel price survey dashboard for the terminal.
#[derive(Debug, Parser)]
#[command(name = "glp_dashboard", version, about)]
pub struct Cli {
    /// Survey CSV to load.
    #[arg(long, env = "GLP_CSV", default_value = "glp.csv")]
    pub csv: PathBuf,

    /// Keep only these regions (repeatable).
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Keep only these brands (repeatable).
    #[arg(long = "brand", value_name = "BRAND")]
    pub brands: Vec<String>,

    /// First collection date, inclusive.
    #[arg(long, value_parser = parse_user_date)]
    pub start: Option<NaiveDate>,

    /// Last collection date, inclusive.
    #[arg(long, value_parser = parse_user_date)]
    pub end: Option<NaiveDate>,

    /// Rows shown per chart preview.
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Write all six views to this JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write one CSV per view into this directory.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Start the menu-driven session instead of printing once.
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        Selection::default()
            .with_regions(self.regions.iter().cloned())
            .with_brands(self.brands.iter().cloned())
            .with_date_range(self.start, self.end)
    }
}

/// Accepts `YYYY-MM-DD` or the survey's own `DD/MM/YYYY`.
pub fn parse_user_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD or DD/MM/YYYY"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_selection_from_flags() {
        let cli = Cli::try_parse_from([
            "glp_dashboard",
            "--csv",
            "data.csv",
            "--region",
            "SE",
            "--region",
            "S",
            "--brand",
            "ULTRAGAZ",
            "--start",
            "2025-01-01",
            "--end",
            "31/01/2025",
        ])
        .unwrap();
        assert_eq!(cli.csv, PathBuf::from("data.csv"));
        assert_eq!(cli.rows, 5);
        let sel = cli.selection();
        assert_eq!(sel.regions.len(), 2);
        assert!(sel.brands.contains("ULTRAGAZ"));
        assert_eq!(
            sel.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
            ))
        );
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from(["glp_dashboard", "--start", "yesterday"]).is_err());
        assert!(parse_user_date("2025-13-01").is_err());
    }
}
