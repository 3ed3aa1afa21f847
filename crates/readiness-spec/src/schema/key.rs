use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::schema::vocab::{Capability, Category, FlatQuestion, Location, MetaField, Provider};

const LOCATION_PREFIX: &str = "loc_";

/// Sub-question addressed under a location/capability pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopedPart {
    /// The capability's own yes/no.
    Capability,
    Reporting,
    Integration,
}

impl ScopedPart {
    pub const DEPENDENTS: &'static [ScopedPart] = &[ScopedPart::Reporting, ScopedPart::Integration];

    fn suffix(self) -> Option<&'static str> {
        match self {
            ScopedPart::Capability => None,
            ScopedPart::Reporting => Some("reporting"),
            ScopedPart::Integration => Some("stip"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScopedPart::Capability => "Component",
            ScopedPart::Reporting => "Reporting",
            ScopedPart::Integration => "Stip Integration",
        }
    }
}

/// Key of a yes/no/N/A question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionKey {
    Flat(FlatQuestion),
    Location {
        location: Location,
        capability: Capability,
        part: ScopedPart,
    },
}

impl QuestionKey {
    pub fn capability(location: Location, capability: Capability) -> Self {
        QuestionKey::Location {
            location,
            capability,
            part: ScopedPart::Capability,
        }
    }

    pub fn scoped(location: Location, capability: Capability, part: ScopedPart) -> Self {
        QuestionKey::Location {
            location,
            capability,
            part,
        }
    }
}

impl From<FlatQuestion> for QuestionKey {
    fn from(value: FlatQuestion) -> Self {
        QuestionKey::Flat(value)
    }
}

/// Key of a multi-select item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey {
    pub location: Location,
    pub capability: Capability,
    pub category: Category,
    pub provider: Provider,
}

impl ItemKey {
    pub fn new(
        location: Location,
        capability: Capability,
        category: Category,
        provider: Provider,
    ) -> Self {
        Self {
            location,
            capability,
            category,
            provider,
        }
    }
}

/// Any parameter name that may appear in a shareable link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Meta(MetaField),
    Question(QuestionKey),
    Items(ItemKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unknown {kind} '{token}'")]
    UnknownToken { kind: &'static str, token: String },
    #[error("unrecognised key '{0}'")]
    Unrecognised(String),
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKey::Flat(question) => f.write_str(question.as_str()),
            QuestionKey::Location {
                location,
                capability,
                part,
            } => {
                write!(f, "{LOCATION_PREFIX}{location}_{capability}")?;
                if let Some(suffix) = part.suffix() {
                    write!(f, "_{suffix}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{LOCATION_PREFIX}{}_{}_{}_{}",
            self.location, self.capability, self.category, self.provider
        )
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Meta(field) => f.write_str(field.as_str()),
            ParamKey::Question(key) => key.fmt(f),
            ParamKey::Items(key) => key.fmt(f),
        }
    }
}

impl FromStr for ParamKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // `loc_selected` shares the location prefix, so metadata goes first.
        if let Ok(field) = raw.parse::<MetaField>() {
            return Ok(ParamKey::Meta(field));
        }
        if let Ok(question) = raw.parse::<FlatQuestion>() {
            return Ok(ParamKey::Question(QuestionKey::Flat(question)));
        }
        let rest = raw
            .strip_prefix(LOCATION_PREFIX)
            .ok_or_else(|| KeyParseError::Unrecognised(raw.to_string()))?;

        let parts = rest.split('_').collect::<Vec<_>>();
        match parts.as_slice() {
            [location, capability] => Ok(ParamKey::Question(QuestionKey::capability(
                location.parse()?,
                capability.parse()?,
            ))),
            [location, capability, "reporting"] => Ok(ParamKey::Question(QuestionKey::scoped(
                location.parse()?,
                capability.parse()?,
                ScopedPart::Reporting,
            ))),
            [location, capability, "stip"] => Ok(ParamKey::Question(QuestionKey::scoped(
                location.parse()?,
                capability.parse()?,
                ScopedPart::Integration,
            ))),
            [location, capability, category, provider] => Ok(ParamKey::Items(ItemKey::new(
                location.parse()?,
                capability.parse()?,
                category.parse()?,
                provider.parse()?,
            ))),
            _ => Err(KeyParseError::Unrecognised(raw.to_string())),
        }
    }
}

impl FromStr for QuestionKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.parse::<ParamKey>()? {
            ParamKey::Question(key) => Ok(key),
            _ => Err(KeyParseError::Unrecognised(raw.to_string())),
        }
    }
}

impl FromStr for ItemKey {
    type Err = KeyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.parse::<ParamKey>()? {
            ParamKey::Items(key) => Ok(key),
            _ => Err(KeyParseError::Unrecognised(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loc_selected_is_metadata() {
        assert_eq!(
            "loc_selected".parse::<ParamKey>(),
            Ok(ParamKey::Meta(MetaField::LocationSelected))
        );
    }

    #[test]
    fn parses_each_location_shape() {
        assert_eq!(
            "loc_gcp_frontend".parse::<QuestionKey>(),
            Ok(QuestionKey::capability(Location::Gcp, Capability::Frontend))
        );
        assert_eq!(
            "loc_onprem_apis_stip".parse::<QuestionKey>(),
            Ok(QuestionKey::scoped(
                Location::OnPrem,
                Capability::Apis,
                ScopedPart::Integration
            ))
        );
        assert_eq!(
            "loc_hybrid_backend_monitoring_cloud-monitoring".parse::<ItemKey>(),
            Ok(ItemKey::new(
                Location::Hybrid,
                Capability::Backend,
                Category::Monitoring,
                Provider::CloudMonitoring
            ))
        );
    }

    #[test]
    fn display_matches_link_grammar() {
        let key = QuestionKey::scoped(Location::Gcp, Capability::Backend, ScopedPart::Reporting);
        assert_eq!(key.to_string(), "loc_gcp_backend_reporting");
        let items = ItemKey::new(
            Location::OnPrem,
            Capability::Frontend,
            Category::Alerting,
            Provider::Splunk,
        );
        assert_eq!(items.to_string(), "loc_onprem_frontend_alerting_splunk");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("loc_".parse::<ParamKey>().is_err());
        assert!("loc_gcp".parse::<ParamKey>().is_err());
        assert!("loc_gcp_frontend_reporting_extra_tail".parse::<ParamKey>().is_err());
        assert!("loc_moon_frontend".parse::<ParamKey>().is_err());
        assert!("loc_gcp_frontend_reporting_splunk".parse::<ParamKey>().is_err());
        assert!("slo".parse::<ParamKey>().is_err());
    }
}
