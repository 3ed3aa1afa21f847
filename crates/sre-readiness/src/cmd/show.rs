use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use readiness_spec::{
    Capability, CapabilityOnboarding, Location, Progress, Stat, StatBand, VisibilityMap,
    compute_onboarding_stats, compute_progress, resolve_drilldowns,
};
use serde::Serialize;

use crate::config::Settings;
use crate::session::Session;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Emit a JSON report instead of text
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

/// A stat with the colour band it is displayed in.
#[derive(Debug, Serialize)]
struct BandedStat {
    value: Stat,
    band: Option<StatBand>,
}

impl From<Stat> for BandedStat {
    fn from(value: Stat) -> Self {
        Self {
            value,
            band: value.band(),
        }
    }
}

impl std::fmt::Display for BandedStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.band {
            Some(band) => write!(f, "{} ({band})", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

#[derive(Debug, Serialize)]
struct OnboardingView {
    overall: BandedStat,
    monitoring: BandedStat,
    alerting: BandedStat,
}

impl From<CapabilityOnboarding> for OnboardingView {
    fn from(stats: CapabilityOnboarding) -> Self {
        Self {
            overall: stats.overall.into(),
            monitoring: stats.monitoring.into(),
            alerting: stats.alerting.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ShowReport {
    link: String,
    app_name: String,
    po_name: String,
    location: Option<Location>,
    progress: Progress,
    percent: u8,
    onboarding: BTreeMap<Capability, OnboardingView>,
    drilldowns: VisibilityMap,
    side_channel_available: bool,
}

pub fn run(args: &ShowArgs, session: &Session, settings: &Settings) -> Result<()> {
    let state = session.state();
    let schema = session.schema();
    let progress = compute_progress(&state, schema);
    let report = ShowReport {
        link: session.shareable(settings),
        app_name: state.app_name.clone(),
        po_name: state.po_name.clone(),
        location: state.location,
        progress,
        percent: progress.percent(),
        onboarding: compute_onboarding_stats(&state, schema, state.location)
            .into_iter()
            .map(|(capability, stats)| (capability, stats.into()))
            .collect(),
        drilldowns: resolve_drilldowns(&state, schema),
        side_channel_available: session.store().side_channel_available(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Link: {}", report.link);
    println!(
        "Progress: {}/{} ({}%)",
        progress.answered, progress.total, report.percent
    );
    println!(
        "Location: {}",
        report
            .location
            .map_or("Not specified", |location| location.title())
    );
    println!("Onboarding:");
    for (capability, stats) in &report.onboarding {
        println!(
            "  {:<10} overall {:<13} monitoring {:<13} alerting {}",
            capability.as_str(),
            stats.overall.to_string(),
            stats.monitoring.to_string(),
            stats.alerting
        );
    }
    let open: Vec<&str> = report
        .drilldowns
        .iter()
        .filter(|(_, visible)| **visible)
        .map(|(key, _)| key.as_str())
        .collect();
    if !open.is_empty() {
        println!("Open sections: {}", open.join(", "));
    }
    if !report.side_channel_available {
        println!("Warning: names cannot be stored on this machine");
    }
    Ok(())
}
