use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::answer::Answer;
use crate::progress::rounded_percent;
use crate::schema::{
    Capability, Category, ItemKey, Location, QuestionKey, ScopedPart, SurveySchema,
};
use crate::state::SurveyState;

pub const PLACEHOLDER: &str = "—";

/// A single onboarding figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Placeholder,
    Percent(u8),
}

/// Colour band used when displaying a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatBand {
    Green,
    Orange,
    Red,
}

impl StatBand {
    pub fn as_str(self) -> &'static str {
        match self {
            StatBand::Green => "green",
            StatBand::Orange => "orange",
            StatBand::Red => "red",
        }
    }
}

impl fmt::Display for StatBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Stat {
    fn from_ratio(selected: usize, total: usize) -> Self {
        rounded_percent(selected, total).map_or(Stat::Placeholder, Stat::Percent)
    }

    pub fn band(self) -> Option<StatBand> {
        match self {
            Stat::Placeholder => None,
            Stat::Percent(pct) if pct >= 80 => Some(StatBand::Green),
            Stat::Percent(pct) if pct < 20 => Some(StatBand::Red),
            Stat::Percent(_) => Some(StatBand::Orange),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Placeholder => f.write_str(PLACEHOLDER),
            Stat::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Onboarding figures for one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityOnboarding {
    pub overall: Stat,
    pub monitoring: Stat,
    pub alerting: Stat,
}

impl CapabilityOnboarding {
    pub const PLACEHOLDER: Self = Self {
        overall: Stat::Placeholder,
        monitoring: Stat::Placeholder,
        alerting: Stat::Placeholder,
    };
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    selected: usize,
    total: usize,
}

impl Tally {
    fn add(&mut self, other: Tally) {
        self.selected += other.selected;
        self.total += other.total;
    }

    fn stat(self) -> Stat {
        Stat::from_ratio(self.selected, self.total)
    }
}

/// Per-capability onboarding at `location`.
///
/// A provider only enters the ratio once at least one of its items is
/// selected, so adopting a subset of providers fully still reads 100%.
pub fn compute_onboarding_stats(
    state: &SurveyState,
    schema: &SurveySchema,
    location: Option<Location>,
) -> BTreeMap<Capability, CapabilityOnboarding> {
    let mut out = schema
        .capabilities
        .iter()
        .map(|capability| (*capability, CapabilityOnboarding::PLACEHOLDER))
        .collect::<BTreeMap<_, _>>();

    let Some(location) = location else {
        return out;
    };

    for capability in &schema.capabilities {
        if !state
            .answer(QuestionKey::capability(location, *capability))
            .is_yes()
        {
            continue;
        }

        let monitoring = category_tally(state, schema, location, *capability, Category::Monitoring);
        let alerting = category_tally(state, schema, location, *capability, Category::Alerting);

        let mut overall = Tally::default();
        overall.add(monitoring);
        overall.add(alerting);
        for part in ScopedPart::DEPENDENTS {
            match state.answer(QuestionKey::scoped(location, *capability, *part)) {
                Answer::Yes => overall.add(Tally {
                    selected: 1,
                    total: 1,
                }),
                Answer::No => overall.add(Tally {
                    selected: 0,
                    total: 1,
                }),
                Answer::NotApplicable | Answer::Unset => {}
            }
        }

        debug!(
            %capability,
            selected = overall.selected,
            total = overall.total,
            "onboarding tally"
        );
        out.insert(
            *capability,
            CapabilityOnboarding {
                overall: overall.stat(),
                monitoring: monitoring.stat(),
                alerting: alerting.stat(),
            },
        );
    }
    out
}

fn category_tally(
    state: &SurveyState,
    schema: &SurveySchema,
    location: Location,
    capability: Capability,
    category: Category,
) -> Tally {
    let mut tally = Tally::default();
    for provider in schema.providers(location, category) {
        let catalog = schema.catalog(*provider, category);
        let key = ItemKey::new(location, capability, category, *provider);
        let selected = state
            .items(&key)
            .iter()
            .filter(|item| catalog.contains(*item))
            .count();
        debug!(%key, selected, catalog = catalog.len(), "provider tally");
        if selected > 0 {
            tally.add(Tally {
                selected,
                total: catalog.len(),
            });
        }
    }
    tally
}
