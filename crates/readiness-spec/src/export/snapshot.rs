use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::answer::Answer;
use crate::schema::{
    Capability, Category, FlatQuestion, ItemKey, Location, Provider, QuestionKey, ScopedPart,
    SurveySchema,
};
use crate::state::SurveyState;

/// Items selected per provider, in the schema's provider order.
pub type ProviderItems = Vec<(Provider, Vec<String>)>;

/// Export-time snapshot of one capability at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityAnswers {
    pub capability: Capability,
    pub answer: Answer,
    pub monitoring: ProviderItems,
    pub alerting: ProviderItems,
    pub reporting: Answer,
    pub integration: Answer,
    pub integration_items: ProviderItems,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAnswers {
    pub location: Location,
    pub capabilities: Vec<CapabilityAnswers>,
}

/// Complete answer snapshot consumed by the CSV and JSON writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedAnswers {
    pub app_name: String,
    pub po_name: String,
    pub app_type: String,
    pub app_type_other: String,
    pub loc_selected: String,
    #[serde(flatten)]
    pub flat: BTreeMap<FlatQuestion, Answer>,
    #[serde(serialize_with = "serialize_locations")]
    pub locations: Vec<LocationAnswers>,
}

impl CollectedAnswers {
    pub fn answer(&self, question: FlatQuestion) -> Answer {
        self.flat.get(&question).copied().unwrap_or_default()
    }
}

/// Gathers every answer across all schema locations, including ones not currently selected.
pub fn collect(state: &SurveyState, schema: &SurveySchema) -> CollectedAnswers {
    let flat = FlatQuestion::ALL
        .iter()
        .map(|question| (*question, state.answer(*question)))
        .collect();

    let locations = schema
        .locations()
        .map(|location| LocationAnswers {
            location,
            capabilities: schema
                .capabilities
                .iter()
                .map(|capability| collect_capability(state, schema, location, *capability))
                .collect(),
        })
        .collect();

    CollectedAnswers {
        app_name: state.app_name.clone(),
        po_name: state.po_name.clone(),
        app_type: state.app_type.clone(),
        app_type_other: state.app_type_other.clone(),
        loc_selected: state
            .location
            .map(|location| location.as_str().to_string())
            .unwrap_or_default(),
        flat,
        locations,
    }
}

fn collect_capability(
    state: &SurveyState,
    schema: &SurveySchema,
    location: Location,
    capability: Capability,
) -> CapabilityAnswers {
    let items_for = |category: Category| -> ProviderItems {
        schema
            .providers(location, category)
            .iter()
            .map(|provider| {
                let key = ItemKey::new(location, capability, category, *provider);
                (*provider, state.items(&key).to_vec())
            })
            .collect()
    };

    CapabilityAnswers {
        capability,
        answer: state.answer(QuestionKey::capability(location, capability)),
        monitoring: items_for(Category::Monitoring),
        alerting: items_for(Category::Alerting),
        reporting: state.answer(QuestionKey::scoped(location, capability, ScopedPart::Reporting)),
        integration: state.answer(QuestionKey::scoped(
            location,
            capability,
            ScopedPart::Integration,
        )),
        integration_items: items_for(Category::Integration),
    }
}

struct ProviderMap<'a>(&'a ProviderItems);

impl Serialize for ProviderMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(provider, items)| (provider.as_str(), items)),
        )
    }
}

struct CapabilityBlock<'a>(&'a [CapabilityAnswers]);

impl Serialize for CapabilityBlock<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() * 6))?;
        for entry in self.0 {
            let cap = entry.capability.as_str();
            map.serialize_entry(cap, &entry.answer)?;
            map.serialize_entry(&format!("{cap}_monitoring"), &ProviderMap(&entry.monitoring))?;
            map.serialize_entry(&format!("{cap}_alerting"), &ProviderMap(&entry.alerting))?;
            map.serialize_entry(&format!("{cap}_reporting"), &entry.reporting)?;
            map.serialize_entry(&format!("{cap}_stip"), &entry.integration)?;
            map.serialize_entry(
                &format!("{cap}_stip_providers"),
                &ProviderMap(&entry.integration_items),
            )?;
        }
        map.end()
    }
}

fn serialize_locations<S: Serializer>(
    locations: &[LocationAnswers],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        locations
            .iter()
            .map(|entry| (entry.location.as_str(), CapabilityBlock(&entry.capabilities))),
    )
}
