//! Fixed vocabulary used by the link grammar.
//!
//! Every token here appears verbatim in shareable links, so none of them may
//! contain `_` (the key separator) or `|` (the item separator).

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::key::KeyParseError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal, $title:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Token used in links and exports.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-facing label.
            pub fn title(self) -> &'static str {
                match self {
                    $($name::$variant => $title,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $($wire => Ok($name::$variant),)+
                    other => Err(KeyParseError::UnknownToken {
                        kind: stringify!($name),
                        token: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Deployment environment class.
    Location {
        Gcp => "gcp", "GCP";
        OnPrem => "onprem", "On-Prem";
        Hybrid => "hybrid", "Hybrid";
    }
}

vocabulary! {
    /// Deployable surface assessed per location.
    Capability {
        Frontend => "frontend", "Frontend";
        Backend => "backend", "Backend";
        Apis => "apis", "Apis";
        Mobile => "mobile", "Mobile";
    }
}

vocabulary! {
    /// Observability provider owning a checklist catalog.
    Provider {
        NewRelic => "newrelic", "New Relic";
        Splunk => "splunk", "Splunk";
        CloudMonitoring => "cloud-monitoring", "Cloud Monitoring-Logging";
    }
}

vocabulary! {
    /// Multi-select category under a capability.
    Category {
        Monitoring => "monitoring", "Monitoring";
        Alerting => "alerting", "Alerting";
        Integration => "stip", "Stip Integration";
    }
}

vocabulary! {
    /// Location-independent yes/no questions.
    FlatQuestion {
        SloExists => "slo_exists", "SLO/SLA Structure Exists";
        SloLatency => "slo_latency", "Latency SLO";
        SloAvailability => "slo_availability", "Availability SLO";
        SloErrorBudget => "slo_error_budget", "Error Budget Defined";
        DrPlan => "dr_plan", "DR Plan Documented";
        DrRtoRpo => "dr_rto_rpo", "RTO/RPO Defined";
        DrTested => "dr_tested", "DR Plan Tested (12 months)";
        BpRunbooks => "bp_runbooks", "Runbooks/Support Guides";
        BpSpof => "bp_spof", "Critical Failures Documented";
        BpNoise => "bp_noise", "Alert Noise Documented";
        BpMttr => "bp_mttr", "MTTR Tracked";
    }
}

vocabulary! {
    /// Scalar metadata fields.
    MetaField {
        AppName => "app_name", "Application Name";
        PoName => "po_name", "PO Name";
        AppType => "app_type", "Application Type";
        AppTypeOther => "app_type_other", "Application Type (Other)";
        LocationSelected => "loc_selected", "Location";
    }
}

impl FlatQuestion {
    /// Questions counted on their own in progress, regardless of other answers.
    pub const TOP_LEVEL: &'static [FlatQuestion] = &[
        FlatQuestion::SloExists,
        FlatQuestion::DrPlan,
        FlatQuestion::DrRtoRpo,
        FlatQuestion::DrTested,
        FlatQuestion::BpRunbooks,
        FlatQuestion::BpSpof,
        FlatQuestion::BpNoise,
        FlatQuestion::BpMttr,
    ];

    /// Drill-down of `SloExists`.
    pub const SLO_DETAILS: &'static [FlatQuestion] = &[
        FlatQuestion::SloLatency,
        FlatQuestion::SloAvailability,
        FlatQuestion::SloErrorBudget,
    ];

    pub const DISASTER_RECOVERY: &'static [FlatQuestion] = &[
        FlatQuestion::DrPlan,
        FlatQuestion::DrRtoRpo,
        FlatQuestion::DrTested,
    ];

    pub const BEST_PRACTICES: &'static [FlatQuestion] = &[
        FlatQuestion::BpRunbooks,
        FlatQuestion::BpSpof,
        FlatQuestion::BpNoise,
        FlatQuestion::BpMttr,
    ];
}

impl MetaField {
    /// Fields kept out of shareable links.
    pub fn is_sensitive(self) -> bool {
        matches!(self, MetaField::AppName | MetaField::PoName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_never_contain_separators() {
        let tokens = Location::ALL
            .iter()
            .map(|v| v.as_str())
            .chain(Capability::ALL.iter().map(|v| v.as_str()))
            .chain(Provider::ALL.iter().map(|v| v.as_str()))
            .chain(Category::ALL.iter().map(|v| v.as_str()));
        for token in tokens {
            assert!(!token.contains('_'), "{token}");
            assert!(!token.contains('|'), "{token}");
        }
    }

    #[test]
    fn parse_rejects_unknown_token() {
        assert_eq!("onprem".parse::<Location>(), Ok(Location::OnPrem));
        let err = "mars".parse::<Location>().expect_err("unknown");
        assert!(err.to_string().contains("mars"));
    }
}
