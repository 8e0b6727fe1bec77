//! Trip report: console table, CSV file, and viewer launch.

mod csv_out;
mod error;
mod output;
mod table;

pub use csv_out::{save_csv, write_csv};
pub use error::ReportError;
pub use output::{VIEWER, default_output_path, find_on_path, home_dir, open_in_viewer};
pub use table::render_table;
