//! Fuel price survey dashboard core.
//!
//! The loader reads the survey CSV once into an immutable [`Table`]; each
//! filter change goes through [`compute_views`], which filters that table and
//! derives the six chart views from the result. The binary is a thin
//! terminal front-end over this library.

pub mod cli;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod session;
pub mod table;
pub mod types;
pub mod util;
pub mod views;

pub use error::{DataLoadError, LoadWarning};
pub use filter::{filter, Selection};
pub use loader::{load, load_with_report, LoadReport};
pub use table::{FilterOptions, Table};
pub use types::{Record, NOT_INFORMED};
pub use views::{compute_views, DashboardViews};
