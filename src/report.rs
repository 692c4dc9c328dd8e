//! Reporting sinks: terminal, JSON and matrix CSV files.

use crate::analysis::AnalysisReport;
use crate::matrix::TypeMatrix;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Terminal,
    Json,
}

pub struct Reporter {
    format: ReportFormat,
    output: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }

    pub fn report(&self, report: &AnalysisReport) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => self.report_terminal(report),
            ReportFormat::Json => self.report_json(report),
        }
    }

    fn report_json(&self, report: &AnalysisReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report).into_diagnostic()?;
        match &self.output {
            Some(path) => fs::write(path, json).into_diagnostic()?,
            None => println!("{json}"),
        }
        Ok(())
    }

    fn report_terminal(&self, report: &AnalysisReport) -> Result<()> {
        println!("{} resources declared", report.total_declared);
        if report.removed_by_libraries > 0 {
            println!(
                "{}",
                format!(
                    "{} supplied by library projects and never redeclared",
                    report.removed_by_libraries
                )
                .dimmed()
            );
        }

        if report.total_unused == 0 {
            println!();
            println!("{}", "No unused resources were detected.".green().bold());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!("{} unused resources were found:", report.total_unused)
                .yellow()
                .bold()
        );
        println!();

        for by_name in report.unused.values() {
            for resource in by_name.values() {
                println!("{resource}");
            }
        }

        println!();
        println!(
            "{}",
            "No dependency graph is maintained between resources; run the scan again after deleting the ones above."
                .dimmed()
        );
        Ok(())
    }
}

/// Write one `<type>.csv` per matrix into `dir`.
pub fn write_matrices(dir: &Path, matrices: &[TypeMatrix]) -> Result<()> {
    fs::create_dir_all(dir).into_diagnostic()?;
    for matrix in matrices {
        let path = dir.join(format!("{}.csv", matrix.res_type));
        fs::write(&path, matrix.to_csv()).into_diagnostic()?;
    }
    Ok(())
}
