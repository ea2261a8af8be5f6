//! Analytics report command implementation

use chrono::NaiveDate;
use serde::Serialize;

use super::{common::CommandContext, output::print_table};
use crate::{
    storage::{ReportKind, Table},
    Result,
};

/// A titled report result for JSON output.
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub number: u8,
    pub title: &'static str,
    pub rows: Table,
}

/// Run one report by number, or the whole catalog.
pub fn run_reports(
    ctx: &CommandContext,
    number: Option<u8>,
    today: NaiveDate,
) -> Result<Vec<ReportOutput>> {
    let kinds: Vec<ReportKind> = match number {
        Some(n) => vec![ReportKind::from_number(n).ok_or_else(|| {
            crate::FoodShareError::InvalidCategory {
                kind: "report number".to_string(),
                value: n.to_string(),
            }
        })?],
        None => ReportKind::ALL.to_vec(),
    };

    kinds
        .into_iter()
        .map(|kind| -> Result<ReportOutput> {
            Ok(ReportOutput {
                number: kind.number(),
                title: kind.title(),
                rows: ctx.db.run_report(kind, today)?,
            })
        })
        .collect()
}

/// Handle the report command
pub fn handle_report(
    ctx: &CommandContext,
    number: Option<u8>,
    today: NaiveDate,
    as_json: bool,
) -> Result<()> {
    let reports = run_reports(ctx, number, today)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        print_table(&format!("{}. {}", report.number, report.title), &report.rows);
    }
    Ok(())
}
