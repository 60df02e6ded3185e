//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use urzednicy_domain::{DateError, EntityId, ItemDocument, NormalizedDate};
use urzednicy_importer::{ImportReport, Outcome};

/// One parsed date expression, as shown by the `date` command.
pub type DateRow = (String, std::result::Result<NormalizedDate, DateError>);

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an import report.
    pub fn format_report(&self, report: &ImportReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(self.format_report_quiet(report)),
        }
    }

    fn format_report_json(&self, report: &ImportReport) -> Result<String> {
        let records: Vec<serde_json::Value> = report
            .records
            .iter()
            .map(|r| {
                let (status, id, error) = outcome_parts(&r.outcome);
                serde_json::json!({
                    "index": r.index,
                    "label": r.label,
                    "status": status,
                    "id": id,
                    "error": error,
                    "skipped": r.skipped.iter().map(|s| serde_json::json!({
                        "field": s.field.as_str(),
                        "value": s.value,
                        "reason": s.reason,
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();

        let json = serde_json::json!({
            "created": report.created(),
            "updated": report.updated(),
            "failed": report.failed(),
            "skipped_fields": report.skipped_fields(),
            "records": records,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_report_table(&self, report: &ImportReport) -> String {
        if report.records.is_empty() {
            return self.colorize("No records imported.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Label", "Status", "Item", "Skipped"]);

        for record in &report.records {
            let (status, id, error) = outcome_parts(&record.outcome);
            let skipped = record
                .skipped
                .iter()
                .map(|s| s.field.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            builder.push_record([
                record.index.to_string(),
                record.label.clone(),
                status.to_string(),
                id.or(error).unwrap_or_default(),
                skipped,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let summary = format!(
            "{} created, {} updated, {} failed, {} fields skipped",
            report.created(),
            report.updated(),
            report.failed(),
            report.skipped_fields()
        );
        let summary = if report.failed() > 0 {
            self.warning(&summary)
        } else {
            self.success(&summary)
        };

        format!("{}\n{}", table, summary)
    }

    /// Quiet mode prints the ids of written items.
    fn format_report_quiet(&self, report: &ImportReport) -> String {
        report
            .records
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Created(id) | Outcome::Updated(id) => Some(id.to_string()),
                Outcome::Failed(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format item documents as they would be sent to Wikibase.
    pub fn format_documents(&self, items: &BTreeMap<EntityId, ItemDocument>) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(items
                .keys()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            _ => {
                let json: serde_json::Map<String, serde_json::Value> = items
                    .iter()
                    .map(|(id, doc)| (id.to_string(), urzednicy_sdk::wire::item_to_json(doc)))
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
        }
    }

    /// Format normalized dates.
    pub fn format_dates(&self, rows: &[DateRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|(input, parsed)| match parsed {
                        Ok(date) => serde_json::json!({
                            "input": input,
                            "value": date.numeric_value,
                            "precision": date.precision.as_str(),
                            "precision_code": date.precision.code(),
                            "qualifier": date.qualifier.as_str(),
                            "time": date.encode().map(|t| t.into_string()),
                        }),
                        Err(e) => serde_json::json!({
                            "input": input,
                            "error": e.to_string(),
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|(_, parsed)| match parsed {
                    Ok(date) => date.encode().map(|t| t.into_string()).unwrap_or_default(),
                    Err(_) => String::new(),
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Input", "Value", "Precision", "Qualifier", "Time"]);
                for (input, parsed) in rows {
                    match parsed {
                        Ok(date) => builder.push_record([
                            input.clone(),
                            date.numeric_value.clone(),
                            format!("{} ({})", date.precision, date.precision.code()),
                            date.qualifier.to_string(),
                            date.encode()
                                .map(|t| t.into_string())
                                .unwrap_or_else(|| "-".to_string()),
                        ]),
                        Err(e) => builder.push_record([
                            input.clone(),
                            self.colorize(&e.to_string(), "red"),
                            String::new(),
                            String::new(),
                            String::new(),
                        ]),
                    }
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Status word, written id and failure reason of an outcome.
fn outcome_parts(outcome: &Outcome) -> (&'static str, Option<String>, Option<String>) {
    match outcome {
        Outcome::Created(id) => ("created", Some(id.to_string()), None),
        Outcome::Updated(id) => ("updated", Some(id.to_string()), None),
        Outcome::Failed(reason) => ("failed", None, Some(reason.clone())),
    }
}
