//! Shareable-link codec.
//!
//! Links carry every non-sensitive answer as a query parameter. Sensitive
//! metadata travels separately (see [`crate::side_channel`]) and is never
//! written here, even when present in the state being encoded.

use std::collections::BTreeSet;

use tracing::debug;
use url::{Url, form_urlencoded};

use crate::answer::Answer;
use crate::reducer::ITEM_SEPARATOR;
use crate::schema::{MetaField, ParamKey};
use crate::state::SurveyState;

/// Values read from the side channel when decoding a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensitiveFields {
    pub app_name: String,
    pub po_name: String,
}

impl SensitiveFields {
    pub fn of(state: &SurveyState) -> Self {
        Self {
            app_name: state.app_name.clone(),
            po_name: state.po_name.clone(),
        }
    }
}

/// Returns the query part of a full URL, a `?query`, or a bare query.
///
/// A string that parses as an absolute URL is never taken as a bare query,
/// even when its path contains `=`.
pub fn query_of(link: &str) -> &str {
    let without_fragment = link.split_once('#').map_or(link, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if Url::parse(without_fragment).is_ok() => "",
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    }
}

/// Serializes `state` to an `application/x-www-form-urlencoded` query without leading `?`.
pub fn encode(state: &SurveyState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    for field in [
        MetaField::AppType,
        MetaField::AppTypeOther,
        MetaField::LocationSelected,
    ] {
        let value = state.meta(field);
        if !value.is_empty() {
            out.append_pair(field.as_str(), &value);
        }
    }
    for (key, answer) in state.answered() {
        if let Some(wire) = answer.to_wire() {
            out.append_pair(&key.to_string(), wire);
        }
    }
    let separator = ITEM_SEPARATOR.to_string();
    for (key, items) in state.item_sets() {
        out.append_pair(&key.to_string(), &items.join(&separator));
    }

    out.finish()
}

/// Rebuilds the state from a link and the side-channel values.
///
/// Unknown keys, malformed values and sensitive fields found in the link are
/// skipped. When a key repeats, the first occurrence wins.
pub fn decode(link: &str, sensitive: &SensitiveFields) -> SurveyState {
    let mut state = SurveyState::new();
    state.app_name = sensitive.app_name.clone();
    state.po_name = sensitive.po_name.clone();

    let mut seen = BTreeSet::new();
    for (raw_key, value) in form_urlencoded::parse(query_of(link).as_bytes()) {
        let key = match raw_key.parse::<ParamKey>() {
            Ok(key) => key,
            Err(err) => {
                debug!(%err, "skipping link parameter");
                continue;
            }
        };
        if !seen.insert(key) {
            continue;
        }
        match key {
            ParamKey::Meta(field) if field.is_sensitive() => {
                debug!(field = field.as_str(), "ignoring sensitive field in link");
            }
            ParamKey::Meta(MetaField::AppType) => state.app_type = value.into_owned(),
            ParamKey::Meta(MetaField::AppTypeOther) => state.app_type_other = value.into_owned(),
            ParamKey::Meta(MetaField::LocationSelected) => {
                state.location = value.parse().ok();
            }
            ParamKey::Meta(_) => {}
            ParamKey::Question(question) => state.set_answer(question, Answer::from_wire(&value)),
            ParamKey::Items(items) => state.set_items(
                items,
                value
                    .split(ITEM_SEPARATOR)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
    state
}

/// Full shareable URL for `state` under `base`.
pub fn share_url(base: &Url, state: &SurveyState) -> Url {
    let mut url = base.clone();
    let query = encode(state);
    url.set_query(if query.is_empty() { None } else { Some(&query) });
    url
}
