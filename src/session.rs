// Menu-driven terminal session.
//
// A session owns its own selection and views; the canonical table is only
// borrowed, so several sessions can read the same table side by side. Every
// filter change recomputes all six views before the next prompt.
use std::io::{self, BufRead, Write};

use crate::cli::parse_user_date;
use crate::filter::Selection;
use crate::output;
use crate::table::{FilterOptions, Table};
use crate::views::{compute_views, DashboardViews};

pub struct Session<'a> {
    table: &'a Table,
    options: FilterOptions,
    selection: Selection,
    views: DashboardViews,
}

impl<'a> Session<'a> {
    /// Start from the default selection: all regions and brands over the
    /// full observed date span.
    pub fn new(table: &'a Table) -> Self {
        let options = FilterOptions::from_table(table);
        let selection = options.default_selection();
        Self::with_selection(table, options, selection)
    }

    pub fn with_selection(table: &'a Table, options: FilterOptions, selection: Selection) -> Self {
        let views = compute_views(table, &selection);
        Self { table, options, selection, views }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    fn refresh(&mut self) {
        self.views = compute_views(self.table, &self.selection);
    }

    /// Replace the region filter with the known values among `input`
    /// (comma-separated). Returns the values that were not recognized.
    pub fn set_regions(&mut self, input: &str) -> Vec<String> {
        let (known, unknown) = split_known(input, &self.options.regions);
        self.selection.regions = known.into_iter().collect();
        self.refresh();
        unknown
    }

    /// Same as [`Session::set_regions`] for brands.
    pub fn set_brands(&mut self, input: &str) -> Vec<String> {
        let (known, unknown) = split_known(input, &self.options.brands);
        self.selection.brands = known.into_iter().collect();
        self.refresh();
        unknown
    }

    /// Set the date range from `"<start> <end>"`; a blank input removes it.
    pub fn set_date_range(&mut self, input: &str) -> Result<(), String> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            [] => {
                self.selection.start = None;
                self.selection.end = None;
            }
            [start, end] => {
                let (start, end) = (parse_user_date(start)?, parse_user_date(end)?);
                self.selection.start = Some(start);
                self.selection.end = Some(end);
            }
            _ => return Err("expected two dates: <start> <end>".to_string()),
        }
        self.refresh();
        Ok(())
    }

    /// Back to the default selection.
    pub fn reset(&mut self) {
        self.selection = self.options.default_selection();
        self.refresh();
    }

    /// Run the menu loop on stdin/stdout until the user exits.
    pub fn run(&mut self, max_rows: usize) {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        loop {
            self.print_menu();
            let Some(choice) = read_line(&mut input, "Enter choice: ") else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    println!("Regions: {}", self.options.regions.join(", "));
                    let line = read_line(&mut input, "Regions (comma-separated, blank for all): ")
                        .unwrap_or_default();
                    report_unknown(&self.set_regions(&line));
                }
                "2" => {
                    println!("Brands: {}", self.options.brands.join(", "));
                    let line = read_line(&mut input, "Brands (comma-separated, blank for all): ")
                        .unwrap_or_default();
                    report_unknown(&self.set_brands(&line));
                }
                "3" => {
                    let line = read_line(&mut input, "Date range <start> <end> (blank for none): ")
                        .unwrap_or_default();
                    if let Err(e) = self.set_date_range(&line) {
                        println!("{}\n", e);
                    }
                }
                "4" => self.reset(),
                "5" => output::print_views(&self.views, max_rows),
                "0" => {
                    println!("Exiting the program.");
                    break;
                }
                _ => println!("Invalid choice. Please enter 0-5.\n"),
            }
        }
    }

    fn print_menu(&self) {
        let sel = &self.selection;
        let dates = match sel.date_range() {
            Some((s, e)) => format!("{} to {}", s.format("%d/%m/%Y"), e.format("%d/%m/%Y")),
            None => "any".to_string(),
        };
        println!("Current filters ({} records):", self.views.row_count);
        println!("  regions: {}", describe(sel.regions.iter()));
        println!("  brands:  {}", describe(sel.brands.iter()));
        println!("  dates:   {}", dates);
        println!("[1] Filter regions");
        println!("[2] Filter brands");
        println!("[3] Filter date range");
        println!("[4] Reset filters");
        println!("[5] Show charts");
        println!("[0] Exit\n");
    }
}

fn split_known(input: &str, allowed: &[String]) -> (Vec<String>, Vec<String>) {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .partition(|v| allowed.contains(v))
}

fn describe<'s>(values: impl Iterator<Item = &'s String>) -> String {
    let v: Vec<&str> = values.map(String::as_str).collect();
    if v.is_empty() {
        "all".to_string()
    } else {
        v.join(", ")
    }
}

fn report_unknown(unknown: &[String]) {
    if !unknown.is_empty() {
        println!("Ignored unknown value(s): {}\n", unknown.join(", "));
    }
}

/// Prompt and read one trimmed line; `None` on end of input.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}
