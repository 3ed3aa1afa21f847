use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::vocab::{Capability, Category, Location, Provider};

/// Current revision of the canonical schema.
pub const SCHEMA_VERSION: u32 = 2;

/// Providers offered at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationProviders {
    pub location: Location,
    #[serde(default)]
    pub monitoring: Vec<Provider>,
    #[serde(default)]
    pub alerting: Vec<Provider>,
}

/// Checklist items of one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProviderCatalog {
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitoring: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerting: Vec<String>,
}

/// Versioned questionnaire configuration passed to every derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SurveySchema {
    pub version: u32,
    pub capabilities: Vec<Capability>,
    pub locations: Vec<LocationProviders>,
    #[serde(default)]
    pub integration_providers: Vec<Provider>,
    #[serde(default)]
    pub integration_items: Vec<String>,
    pub catalogs: Vec<ProviderCatalog>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema version {found} is not supported (expected {})", SCHEMA_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("schema declares no capabilities")]
    NoCapabilities,
    #[error("location '{0}' is declared more than once")]
    DuplicateLocation(Location),
    #[error("provider '{provider}' is offered for {category} but has no catalog")]
    MissingCatalog {
        provider: Provider,
        category: Category,
    },
    #[error("catalog item '{0}' contains the reserved '|' separator")]
    ReservedSeparator(String),
}

fn items(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}

impl SurveySchema {
    /// The schema shipped with the questionnaire.
    pub fn canonical() -> Self {
        let metrics = [
            "Response times",
            "HTTP Response Codes",
            "Error Rate",
            "Throughput",
            "Availability",
            "Anomalies",
            "DB connections",
            "Restarts/Uptime",
            "Other",
        ];
        Self {
            version: SCHEMA_VERSION,
            capabilities: vec![Capability::Frontend, Capability::Backend, Capability::Apis],
            locations: vec![
                LocationProviders {
                    location: Location::Gcp,
                    monitoring: vec![Provider::NewRelic, Provider::CloudMonitoring],
                    alerting: vec![Provider::NewRelic, Provider::CloudMonitoring],
                },
                LocationProviders {
                    location: Location::OnPrem,
                    monitoring: vec![Provider::NewRelic, Provider::Splunk],
                    alerting: vec![Provider::NewRelic, Provider::Splunk],
                },
                LocationProviders {
                    location: Location::Hybrid,
                    monitoring: vec![
                        Provider::NewRelic,
                        Provider::Splunk,
                        Provider::CloudMonitoring,
                    ],
                    alerting: vec![
                        Provider::NewRelic,
                        Provider::Splunk,
                        Provider::CloudMonitoring,
                    ],
                },
            ],
            integration_providers: vec![Provider::NewRelic, Provider::Splunk],
            integration_items: items(&["Enabled"]),
            catalogs: vec![
                ProviderCatalog {
                    provider: Provider::NewRelic,
                    monitoring: items(&["APM (dashboard)", "INFRA (dashboard)", "SYNT", "Other"]),
                    alerting: items(&["Availability", "Error rate", "Other"]),
                },
                ProviderCatalog {
                    provider: Provider::Splunk,
                    monitoring: items(&metrics),
                    alerting: items(&["Critical errors", "Error Rate", "Other"]),
                },
                ProviderCatalog {
                    provider: Provider::CloudMonitoring,
                    monitoring: items(&metrics),
                    alerting: items(&["Critical errors", "Error Rate", "Other"]),
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion {
                found: self.version,
            });
        }
        if self.capabilities.is_empty() {
            return Err(SchemaError::NoCapabilities);
        }

        for (idx, entry) in self.locations.iter().enumerate() {
            if self.locations[..idx]
                .iter()
                .any(|other| other.location == entry.location)
            {
                return Err(SchemaError::DuplicateLocation(entry.location));
            }
            for (category, providers) in [
                (Category::Monitoring, &entry.monitoring),
                (Category::Alerting, &entry.alerting),
            ] {
                for provider in providers {
                    if self.catalog(*provider, category).is_empty() {
                        return Err(SchemaError::MissingCatalog {
                            provider: *provider,
                            category,
                        });
                    }
                }
            }
        }

        let all_items = self
            .catalogs
            .iter()
            .flat_map(|catalog| catalog.monitoring.iter().chain(catalog.alerting.iter()))
            .chain(self.integration_items.iter());
        for item in all_items {
            if item.contains('|') {
                return Err(SchemaError::ReservedSeparator(item.clone()));
            }
        }
        Ok(())
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Locations in declaration order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.locations.iter().map(|entry| entry.location)
    }

    /// Providers offered for `category` at `location`.
    pub fn providers(&self, location: Location, category: Category) -> &[Provider] {
        if category == Category::Integration {
            return &self.integration_providers;
        }
        let Some(entry) = self
            .locations
            .iter()
            .find(|entry| entry.location == location)
        else {
            return &[];
        };
        match category {
            Category::Monitoring => &entry.monitoring,
            Category::Alerting => &entry.alerting,
            Category::Integration => &self.integration_providers,
        }
    }

    /// Full checklist of `provider` for `category`.
    pub fn catalog(&self, provider: Provider, category: Category) -> &[String] {
        if category == Category::Integration {
            return if self.integration_providers.contains(&provider) {
                &self.integration_items
            } else {
                &[]
            };
        }
        self.catalogs
            .iter()
            .find(|catalog| catalog.provider == provider)
            .map(|catalog| match category {
                Category::Monitoring => catalog.monitoring.as_slice(),
                _ => catalog.alerting.as_slice(),
            })
            .unwrap_or(&[])
    }
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self::canonical()
    }
}
