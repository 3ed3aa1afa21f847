use anyhow::{Context, Result, bail};
use clap::Args;
use readiness_spec::{ItemKey, Location, MetaField, ParamKey};

use crate::config::Settings;
use crate::session::Session;

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Link key, e.g. `app_type`, `slo_exists` or `loc_gcp_frontend_reporting`
    #[arg(value_name = "KEY")]
    pub key: String,
    /// Text for metadata; `yes`, `no`, `na` or empty for questions
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// `gcp`, `onprem`, `hybrid` or `none`
    #[arg(value_name = "LOCATION")]
    pub location: String,
}

#[derive(Args, Debug, Clone)]
pub struct ToggleArgs {
    /// Item key, e.g. `loc_gcp_frontend_monitoring_newrelic`
    #[arg(value_name = "KEY")]
    pub key: String,
    /// Catalog entry to add or remove
    #[arg(value_name = "ITEM")]
    pub item: String,
}

pub fn run_set(args: &SetArgs, session: &mut Session, settings: &Settings) -> Result<()> {
    let key: ParamKey = args
        .key
        .parse()
        .with_context(|| format!("unknown key '{}'", args.key))?;
    let store = session.store_mut();
    match key {
        ParamKey::Meta(MetaField::LocationSelected) => {
            store.select_location(parse_location(&args.value)?);
        }
        ParamKey::Meta(field) => {
            if field.is_sensitive() && !store.side_channel_available() {
                bail!("{} cannot be stored: the state directory is not writable", field.title());
            }
            store.set_meta(field, &args.value);
        }
        ParamKey::Question(question) => {
            store.set_answer(question, args.value.as_str())?;
        }
        ParamKey::Items(_) => {
            bail!("'{}' is a checklist; use `toggle {} <ITEM>`", args.key, args.key);
        }
    }
    finish(session, settings)
}

pub fn run_location(args: &LocationArgs, session: &mut Session, settings: &Settings) -> Result<()> {
    let location = parse_location(&args.location)?;
    session.store_mut().select_location(location);
    finish(session, settings)
}

pub fn run_toggle(args: &ToggleArgs, session: &mut Session, settings: &Settings) -> Result<()> {
    let key: ItemKey = args
        .key
        .parse()
        .with_context(|| format!("'{}' is not a checklist key", args.key))?;
    let state = session.store_mut().toggle_multiselect(key, &args.item)?;
    let selected = state.items(&key).iter().any(|item| item == &args.item);
    eprintln!(
        "{} '{}'",
        if selected { "Selected" } else { "Cleared" },
        args.item
    );
    finish(session, settings)
}

pub fn run_reset(session: &mut Session) -> Result<()> {
    session.store_mut().reset();
    session.persist()?;
    println!("Assessment reset");
    Ok(())
}

fn parse_location(raw: &str) -> Result<Option<Location>> {
    match raw.trim() {
        "" | "none" => Ok(None),
        other => other
            .parse()
            .map(Some)
            .with_context(|| format!("unknown location '{other}'")),
    }
}

fn finish(session: &Session, settings: &Settings) -> Result<()> {
    session.persist()?;
    println!("{}", session.shareable(settings));
    Ok(())
}
