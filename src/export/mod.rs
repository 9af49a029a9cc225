pub mod formatter;
pub mod table;
pub mod writer;

pub use formatter::{format_bin_table, format_chart, format_json, should_use_colors};
pub use table::{assign_countries, build_export_rows, BinAssignment, ExportRow};
pub use writer::{export_file_name, write_export};
