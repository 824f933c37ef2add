mod errors;
mod json;
mod xml;

use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

pub use errors::ReportError;
pub use json::JsonReporter;
pub use xml::XmlReporter;

pub const REPORT_FILE_NAME: &str = "report.xml";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

fn write_report(path: &Path, contents: &str) -> Result<PathBuf, ReportError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).map_err(|error| ReportError::io(parent, error))?;
    }

    write(path, contents).map_err(|error| ReportError::io(path, error))?;

    Ok(path.to_path_buf())
}
