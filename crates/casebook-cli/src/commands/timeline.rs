//! Timeline command implementation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use casebook_case_api::CaseApi;
use casebook_common_config::CasebookConfig;
use casebook_common_core::CaseId;
use casebook_history_timeline::{
    RenderOptions, Timeline, TimelineBuilder, TimelineFilter, TimelineSummary,
};
use casebook_history_types::ingest::{
    audit_log_from_json, case_events_from_json, status_history_from_json,
};
use casebook_session::Session;
use clap::{Parser, ValueHint};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, IconContext};

/// Show a case's history as one timeline, newest first
#[derive(Debug, Parser)]
pub struct TimelineCommand {
    /// Status history JSON file
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    status_history: Option<PathBuf>,

    /// Audit log JSON file
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    audit_log: Option<PathBuf>,

    /// JSON file mixing status changes and audit records
    #[arg(
        long,
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        conflicts_with_all = ["status_history", "audit_log"]
    )]
    events: Option<PathBuf>,

    /// Fetch the history of this case from the case API
    #[arg(
        long,
        value_name = "ID",
        conflicts_with_all = ["status_history", "audit_log", "events"]
    )]
    case: Option<String>,

    /// Login token used for --case
    #[arg(long, env = "CASEBOOK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Entries to show: all, status, edit or view
    #[arg(short, long)]
    filter: Option<String>,

    /// Use plain ASCII icons
    #[arg(long)]
    ascii: bool,
}

/// Where the records come from.
#[derive(Debug)]
enum Source<'a> {
    Files {
        status_history: Option<&'a Path>,
        audit_log: Option<&'a Path>,
    },
    Feed(&'a Path),
    Api { case_id: CaseId, token: &'a str },
}

impl TimelineCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let filter = self.resolve_filter(&ctx.config)?;
        let builder = TimelineBuilder::with_options(render_options(&ctx.config));

        let icons = self.icons();
        let report = match self.source()? {
            Source::Files {
                status_history,
                audit_log,
            } => {
                let status = match status_history {
                    Some(path) => status_history_from_json(&read_file(path)?)?,
                    None => Vec::new(),
                };
                let audit = match audit_log {
                    Some(path) => audit_log_from_json(&read_file(path)?)?,
                    None => Vec::new(),
                };
                TimelineReport::new(
                    filter,
                    builder.build(&status, &audit, filter),
                    TimelineSummary::from_entries(&builder.merge(&status, &audit)),
                    icons,
                )
            }
            Source::Feed(path) => {
                let events = case_events_from_json(&read_file(path)?)?;
                TimelineReport::new(
                    filter,
                    builder.build_events(&events, filter),
                    TimelineSummary::from_entries(&builder.merge_events(&events)),
                    icons,
                )
            }
            Source::Api { case_id, token } => {
                let session = Session::from_token(token)?;
                let api = CaseApi::from_config(&ctx.config.api)?;
                info!(case = %case_id, user = %session.claims().name, "fetching case history");
                let history = api.case_history(&session, &case_id).await?;
                TimelineReport::new(
                    filter,
                    builder.build(&history.status_events, &history.audit_events, filter),
                    TimelineSummary::from_entries(
                        &builder.merge(&history.status_events, &history.audit_events),
                    ),
                    icons,
                )
            }
        };

        debug!(filter = %filter, shown = report.timeline.len(), total = report.summary.total, "timeline ready");
        print_output(ctx, &report)
    }

    /// `--filter` wins over `timeline.default_filter`.
    fn resolve_filter(&self, config: &CasebookConfig) -> Result<TimelineFilter, CliError> {
        let name = self
            .filter
            .as_deref()
            .unwrap_or(&config.timeline.default_filter);
        Ok(name.parse::<TimelineFilter>()?)
    }

    fn source(&self) -> Result<Source<'_>, CliError> {
        if let Some(case) = &self.case {
            let case_id = CaseId::parse(case)
                .map_err(|e| CliError::validation(format!("Invalid case id: {e}")))?;
            let token = self.token.as_deref().filter(|t| !t.trim().is_empty()).ok_or_else(|| {
                CliError::validation_with_hint(
                    "--case needs a login token",
                    "Pass --token or set CASEBOOK_TOKEN",
                )
            })?;
            return Ok(Source::Api { case_id, token });
        }

        if let Some(path) = &self.events {
            return Ok(Source::Feed(path));
        }

        if self.status_history.is_none() && self.audit_log.is_none() {
            return Err(CliError::user_with_hint(
                "No history source given",
                "Pass --status-history and/or --audit-log, --events, or --case with a token",
            ));
        }

        Ok(Source::Files {
            status_history: self.status_history.as_deref(),
            audit_log: self.audit_log.as_deref(),
        })
    }

    fn icons(&self) -> IconContext {
        if self.ascii {
            IconContext::ascii()
        } else {
            IconContext::new()
        }
    }
}

fn render_options(config: &CasebookConfig) -> RenderOptions {
    RenderOptions {
        unknown_actor: config.timeline.unknown_actor.clone(),
        note_prefix: config.timeline.note_prefix.clone(),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::io_with_path(format!("Failed to read {}", path.display()), e, path))
}

/// A filtered timeline plus per-category counts of the unfiltered one.
#[derive(Debug, Serialize)]
pub struct TimelineReport {
    pub filter: TimelineFilter,
    pub summary: TimelineSummary,
    #[serde(rename = "entries", serialize_with = "serialize_entries")]
    pub timeline: Timeline,
    #[serde(skip)]
    icons: IconContext,
}

impl TimelineReport {
    pub fn new(
        filter: TimelineFilter,
        timeline: Timeline,
        summary: TimelineSummary,
        icons: IconContext,
    ) -> Self {
        Self {
            filter,
            summary,
            timeline,
            icons,
        }
    }
}

/// Entries as a plain array, `[]` for an empty timeline.
fn serialize_entries<S: Serializer>(timeline: &Timeline, serializer: S) -> Result<S::Ok, S::Error> {
    timeline.entries().serialize(serializer)
}

impl FormattedOutput for TimelineReport {
    fn format_text(&self) -> String {
        let entries = match &self.timeline {
            Timeline::Empty => return "No history records found.".to_string(),
            Timeline::Entries(entries) => entries,
        };

        let mut out = format!(
            "Filter: {} ({} of {} entries)\n",
            self.filter,
            entries.len(),
            self.summary.total
        );

        for entry in entries {
            let _ = write!(
                out,
                "\n{} {}\n",
                self.icons.timeline(entry.icon()),
                entry.headline()
            );
            for line in entry.rendered_message.lines().skip(1) {
                let _ = writeln!(out, "    {line}");
            }
            let _ = writeln!(
                out,
                "    by {} at {}",
                entry.actor_name,
                entry.timestamp.to_iso8601()
            );
        }

        out.trim_end().to_string()
    }
}
