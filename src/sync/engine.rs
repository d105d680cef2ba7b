//! Per-record sync state machine.
//!
//! For each selected master page: validate the required fields,
//! project them through the destination schema, create the slave page,
//! and stamp the master page with a terminal status. Every record gets
//! exactly one attempt per run and ends `Synced` or `Failed`; a single
//! record's failure never aborts the run.

use std::collections::HashMap;

use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{Page, Property, SchemaMap, SelectOption, SyncStatus};
use crate::notion::NotionApi;
use crate::sync::encode::encode;
use crate::sync::extract::extract;

/// Master properties that must be present and non-empty for a page to
/// sync. Static configuration, not derived from either schema.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "Name",
    "Impressions",
    "Likes",
    "Bookmarks",
    "Retweets",
    "Comments",
    "CTR",
    "URL",
    "Author",
    "Handle",
    "Date",
    "Retention",
    "Engagement Rate",
    "Niche",
];

/// Terminal outcome of one record's attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Synced,
    Failed,
}

/// One record's result within a run.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    /// Master page id.
    pub page_id: String,
    /// Display name (the page's Name property, or a positional label).
    pub name: String,
    pub outcome: Outcome,
    /// One-line failure reason, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregate result of a run. The run itself never fails because
/// records did; fatal errors happen before the loop starts.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl RunReport {
    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Synced)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Failed)
            .count()
    }
}

/// Drives the per-record state machine against the collaborator.
pub struct SyncEngine<'a, A: NotionApi> {
    api: &'a A,
    slave_db_id: &'a str,
    schema: &'a SchemaMap,
    dry_run: bool,
    progress: bool,
}

impl<'a, A: NotionApi> SyncEngine<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, slave_db_id: &'a str, schema: &'a SchemaMap) -> Self {
        Self {
            api,
            slave_db_id,
            schema,
            dry_run: false,
            progress: false,
        }
    }

    /// Validate and project records without writing anything.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Print per-record progress lines to stdout.
    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Process every page in selection order, one attempt each.
    pub async fn run(&self, pages: &[Page]) -> RunReport {
        let total = pages.len();
        let mut report = RunReport::default();

        for (i, page) in pages.iter().enumerate() {
            let name = display_name(page, i + 1);
            if self.progress {
                println!("Syncing page {}/{}: {}", i + 1, total, name);
            }

            let outcome = self.sync_page(page, name).await;
            match &outcome.outcome {
                Outcome::Synced => {
                    info!(page = %outcome.page_id, "page synced");
                    if self.progress {
                        println!("  {}", "Synced.".green());
                    }
                }
                Outcome::Failed => {
                    let reason = outcome.reason.as_deref().unwrap_or("unknown");
                    warn!(page = %outcome.page_id, reason, "page failed");
                    if self.progress {
                        println!("  {} {}", "Failed:".red(), reason);
                    }
                }
            }
            report.outcomes.push(outcome);
        }

        report
    }

    /// One record, one attempt, one terminal status.
    async fn sync_page(&self, page: &Page, name: String) -> RecordOutcome {
        match self.try_sync(page).await {
            Ok(()) => RecordOutcome {
                page_id: page.id.clone(),
                name,
                outcome: Outcome::Synced,
                reason: None,
            },
            Err(err) => {
                // Best-effort terminal stamp; a failing status update
                // must not abort the rest of the run either.
                if !self.dry_run {
                    if let Err(update_err) = self.update_status(page, SyncStatus::Failed).await {
                        warn!(page = %page.id, error = %update_err, "failed to mark page as Failed");
                    }
                }
                RecordOutcome {
                    page_id: page.id.clone(),
                    name,
                    outcome: Outcome::Failed,
                    reason: Some(err.to_string()),
                }
            }
        }
    }

    /// Validate, project, create, and stamp `Synced`.
    async fn try_sync(&self, page: &Page) -> Result<()> {
        // Collect ALL missing fields before reporting; the diagnostic
        // must name every one, not just the first.
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| extract(page, field).is_none_or(|v| v.is_blank()))
            .map(|field| (*field).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingFields { fields: missing });
        }

        let mut properties: HashMap<String, Property> = HashMap::new();
        for field in REQUIRED_FIELDS {
            // A required field absent from the destination schema is
            // silently excluded from the write, not an error.
            let Some(kind) = self.schema.get(field) else {
                continue;
            };
            let Some(value) = extract(page, field) else {
                continue;
            };
            if let Some(encoded) = encode(*kind, &value) {
                properties.insert(field.to_string(), encoded);
            }
        }

        if self.dry_run {
            return Ok(());
        }

        self.api.create_page(self.slave_db_id, properties).await?;
        self.update_status(page, SyncStatus::Synced).await?;
        Ok(())
    }

    async fn update_status(&self, page: &Page, status: SyncStatus) -> Result<()> {
        let mut properties = HashMap::new();
        properties.insert(
            "Sync Status".to_string(),
            Property::Select {
                select: Some(SelectOption::new(status.as_str())),
            },
        );
        self.api.update_page(&page.id, properties).await
    }
}

/// A page's Name for progress output, falling back to its position.
fn display_name(page: &Page, position: usize) -> String {
    match extract(page, "Name") {
        Some(value) if value.is_truthy() => value.to_text(),
        _ => format!("Page {position}"),
    }
}
