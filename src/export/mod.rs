//! Serialization of a [`BoardReport`] into the three export shapes.
//!
//! Every function here is pure: it builds a `String` and leaves writing it
//! anywhere to the caller.

pub mod csv;
pub mod gpl;
pub mod json;

use std::fmt;

use crate::models::BoardReport;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// One row per palette color
    Csv,
    /// Full report
    #[default]
    Json,
    /// GIMP palette file
    Gpl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Gpl => "gpl",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Render `report` in `format`.
pub fn render(report: &BoardReport, format: ExportFormat) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Csv => Ok(csv::to_csv(&report.result)),
        ExportFormat::Json => json::to_json(report),
        ExportFormat::Gpl => Ok(gpl::to_gpl(&report.board.display_name(), &report.result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsed_by_clap() {
        use clap::ValueEnum;

        assert_eq!(ExportFormat::from_str("gpl", true), Ok(ExportFormat::Gpl));
        assert_eq!(ExportFormat::from_str("CSV", true), Ok(ExportFormat::Csv));
        assert!(ExportFormat::from_str("gimp", true).is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Gpl.extension(), "gpl");
        assert_eq!(ExportFormat::default().to_string(), "json");
    }
}
