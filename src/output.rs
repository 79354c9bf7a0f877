use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use crate::util::{format_int, format_number};
use crate::views::DashboardViews;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown table of the first `max_rows` rows, or `(no rows)`.
pub fn render_rows<T: Tabled + Clone>(rows: &[T], max_rows: usize) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let mut table = Table::new(rows.iter().take(max_rows).cloned());
    table.with(Style::markdown());
    let mut s = table.to_string();
    if rows.len() > max_rows {
        s.push_str(&format!("\n... {} more rows", format_int(rows.len() - max_rows)));
    }
    s
}

pub fn preview_table<T: Tabled + Clone>(chart_no: usize, title: &str, rows: &[T], max_rows: usize) {
    println!("Chart {}: {}\n", chart_no, title);
    println!("{}\n", render_rows(rows, max_rows));
}

/// Print all six views in chart order.
pub fn print_views(views: &DashboardViews, max_rows: usize) {
    println!("Filtered records: {}\n", format_int(views.row_count));
    preview_table(1, "Mean sale price by state", &views.state_means, max_rows);
    preview_table(
        2,
        "Mean sale price by collection date and region",
        &views.date_region_means,
        max_rows,
    );
    preview_table(3, "Mean sale price by brand", &views.brand_means, max_rows);
    // The histogram is only meaningful as a whole.
    preview_table(4, "Sale price distribution", &views.histogram, views.histogram.len());
    preview_table(5, "Sale price spread by brand", &views.brand_boxes, max_rows);
    preview_table(6, "Share of records by brand", &views.brand_counts, max_rows);
    if let Some(top) = views.brand_counts.first() {
        println!(
            "Largest brand: {} ({} records, {}%)\n",
            top.brand,
            format_int(top.count),
            format_number(top.share_pct, 2)
        );
    }
}

/// Write one CSV per view into `dir`, returning the files written.
pub fn export_views(dir: &Path, views: &DashboardViews) -> Result<Vec<String>, Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let files = [
        "chart1_state_means.csv",
        "chart2_date_region_means.csv",
        "chart3_brand_means.csv",
        "chart4_price_histogram.csv",
        "chart5_brand_boxes.csv",
        "chart6_brand_counts.csv",
    ];
    write_csv(&dir.join(files[0]), &views.state_means)?;
    write_csv(&dir.join(files[1]), &views.date_region_means)?;
    write_csv(&dir.join(files[2]), &views.brand_means)?;
    write_csv(&dir.join(files[3]), &views.histogram)?;
    write_csv(&dir.join(files[4]), &views.brand_boxes)?;
    write_csv(&dir.join(files[5]), &views.brand_counts)?;
    Ok(files.iter().map(|f| f.to_string()).collect())
}
