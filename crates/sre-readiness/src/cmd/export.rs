use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use readiness_spec::{
    CollectedAnswers, EmailDraft, JSON_FILENAME, check_export_ready, collect, csv_filename,
    to_csv, to_json,
};
use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime};
use tracing::debug;

use crate::config::Settings;
use crate::session::Session;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,
    /// Directory the file is written to
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
    /// Assessment date used in the file name (defaults to today, UTC)
    #[arg(long = "date", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<Date>,
}

#[derive(Args, Debug, Clone)]
pub struct EmailArgs {
    /// Overrides the configured recipient
    #[arg(long = "to", value_name = "ADDRESS")]
    pub to: Option<String>,
    #[arg(long = "date", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<Date>,
}

pub fn run_export(args: &ExportArgs, session: &Session) -> Result<()> {
    let data = ready_snapshot(session)?;
    let (file_name, contents) = match args.format {
        ExportFormat::Csv => (
            csv_filename(&data.app_name, args.date.unwrap_or_else(today)),
            to_csv(&data),
        ),
        ExportFormat::Json => (JSON_FILENAME.to_string(), to_json(&data)?),
    };

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let path = args.out.join(file_name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), format = ?args.format, "export written");
    println!("{}", path.display());
    Ok(())
}

pub fn run_email(args: &EmailArgs, session: &Session, settings: &Settings) -> Result<()> {
    let data = ready_snapshot(session)?;
    let date = args.date.unwrap_or_else(today);
    let attachment = csv_filename(&data.app_name, date);
    let draft = EmailDraft::render(&data, date, &attachment).context("failed to render e-mail")?;
    let recipient = args.to.as_deref().unwrap_or(&settings.recipient);

    println!("To: {recipient}");
    println!("Subject: {}", draft.subject);
    println!();
    println!("{}", draft.body);
    println!();
    println!("{}", draft.mailto(recipient));
    Ok(())
}

fn ready_snapshot(session: &Session) -> Result<CollectedAnswers> {
    let state = session.state();
    let progress = check_export_ready(&state, session.schema())?;
    debug!(answered = progress.answered, total = progress.total, "export gate passed");
    Ok(collect(&state, session.schema()))
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, &Iso8601::DATE).map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}
