pub mod csv;
pub mod formatter;
pub mod report;

pub use formatter::{format_status_line, format_summary_table, format_url_list};
pub use report::{ReportOptions, write_records, write_report};
