//! Output formatting for CLI command summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SynsearchArgs};
use crate::engine::IndexReport;
use crate::error::Result;

/// Result structure for an index build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub index_dir: String,
    pub documents: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

impl IndexSummary {
    pub fn new(report: &IndexReport, duration_ms: u64) -> Self {
        IndexSummary {
            index_dir: report.index_dir.display().to_string(),
            documents: report.documents,
            skipped: report.skipped,
            duration_ms,
        }
    }
}

impl fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Indexed {} documents into {}",
            self.documents, self.index_dir
        )?;
        if self.skipped > 0 {
            write!(f, " ({} records skipped)", self.skipped)?;
        }
        Ok(())
    }
}

/// Render a result in the requested format.
pub fn render_result<T: Serialize + fmt::Display>(result: &T, args: &SynsearchArgs) -> Result<String> {
    Ok(match args.output_format {
        OutputFormat::Human => result.to_string(),
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(result)?,
        OutputFormat::Json => serde_json::to_string(result)?,
    })
}

/// Print a result in the requested format.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &SynsearchArgs) -> Result<()> {
    println!("{}", render_result(result, args)?);
    Ok(())
}
