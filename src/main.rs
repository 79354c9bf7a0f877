// Entry point and high-level CLI flow.
//
// - Loads the survey CSV once and prints load diagnostics.
// - Without `--interactive`, computes the six views for the selection given
//   on the command line, prints previews and optionally exports them.
// - With `--interactive`, hands the table to a menu session that recomputes
//   the views after every filter change.
use clap::Parser;
use std::process::ExitCode;

use glp_dashboard::cli::Cli;
use glp_dashboard::session::Session;
use glp_dashboard::util::format_int;
use glp_dashboard::{compute_views, load_with_report, output, FilterOptions, LoadReport};

fn print_load_report(report: &LoadReport) {
    println!(
        "Processing dataset... ({} rows read, {} loaded)",
        format_int(report.total_rows),
        format_int(report.loaded_rows)
    );
    if report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            format_int(report.skipped_rows)
        );
    }
    if report.unparsed_dates > 0 {
        println!(
            "Note: {} rows have no usable collection date.",
            format_int(report.unparsed_dates)
        );
    }
    println!();
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let (table, report) = match load_with_report(&cli.csv) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    print_load_report(&report);

    if cli.interactive {
        let options = FilterOptions::from_table(&table);
        let selection = cli.selection();
        let mut session = if selection.is_unrestricted() {
            Session::new(&table)
        } else {
            Session::with_selection(&table, options, selection)
        };
        session.run(cli.rows);
        return ExitCode::SUCCESS;
    }

    let views = compute_views(&table, &cli.selection());
    output::print_views(&views, cli.rows);

    let mut ok = true;
    if let Some(path) = &cli.json {
        match output::write_json(path, &views) {
            Ok(()) => println!("Views saved to {}", path.display()),
            Err(e) => {
                eprintln!("Write error: {}", e);
                ok = false;
            }
        }
    }
    if let Some(dir) = &cli.export_dir {
        match output::export_views(dir, &views) {
            Ok(files) => println!("Exported {} files to {}", files.len(), dir.display()),
            Err(e) => {
                eprintln!("Write error: {}", e);
                ok = false;
            }
        }
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
