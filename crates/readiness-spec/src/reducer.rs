//! Pure state transitions.
//!
//! Cascades are applied inside the same `apply` call as the primary write, so
//! a caller never observes a capability set to No while its reporting or
//! integration answers are still pending.

use tracing::debug;

use crate::answer::Answer;
use crate::schema::{FlatQuestion, ItemKey, Location, MetaField, QuestionKey, ScopedPart};
use crate::state::SurveyState;

/// Separator between multi-select items in links.
pub const ITEM_SEPARATOR: char = '|';

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetMeta { field: MetaField, value: String },
    SelectLocation(Option<Location>),
    SetAnswer { key: QuestionKey, answer: Answer },
    ToggleItem { key: ItemKey, item: String },
    Reset,
}

pub fn apply(state: &SurveyState, event: &Event) -> SurveyState {
    let mut next = state.clone();
    match event {
        Event::SetMeta { field, value } => set_meta(&mut next, *field, value),
        Event::SelectLocation(location) => next.location = *location,
        Event::SetAnswer { key, answer } => {
            next.set_answer(*key, *answer);
            cascade(&mut next, *key, *answer);
        }
        Event::ToggleItem { key, item } => {
            if item.is_empty() || item.contains(ITEM_SEPARATOR) {
                debug!(%key, item = %item, "ignoring unencodable item");
            } else {
                let mut items = next.items(key).to_vec();
                match items.iter().position(|existing| existing == item) {
                    Some(idx) => {
                        items.remove(idx);
                    }
                    None => items.push(item.clone()),
                }
                next.set_items(*key, items);
            }
        }
        Event::Reset => next = SurveyState::new(),
    }
    next
}

/// Applies events left to right.
pub fn apply_all<'a>(state: &SurveyState, events: impl IntoIterator<Item = &'a Event>) -> SurveyState {
    events
        .into_iter()
        .fold(state.clone(), |acc, event| apply(&acc, event))
}

fn set_meta(state: &mut SurveyState, field: MetaField, value: &str) {
    match field {
        MetaField::AppName => state.app_name = value.to_string(),
        MetaField::PoName => state.po_name = value.to_string(),
        MetaField::AppType => state.app_type = value.to_string(),
        MetaField::AppTypeOther => state.app_type_other = value.to_string(),
        MetaField::LocationSelected => {
            state.location = match value.trim() {
                "" => None,
                raw => match raw.parse() {
                    Ok(location) => Some(location),
                    Err(err) => {
                        debug!(%err, "clearing location");
                        None
                    }
                },
            }
        }
    }
}

fn cascade(state: &mut SurveyState, key: QuestionKey, answer: Answer) {
    match key {
        QuestionKey::Flat(FlatQuestion::SloExists)
            if matches!(answer, Answer::No | Answer::NotApplicable) =>
        {
            for detail in FlatQuestion::SLO_DETAILS {
                state.set_answer(*detail, Answer::NotApplicable);
            }
        }
        QuestionKey::Location {
            location,
            capability,
            part: ScopedPart::Capability,
        } if answer != Answer::Yes => {
            for part in ScopedPart::DEPENDENTS {
                state.set_answer(
                    QuestionKey::scoped(location, capability, *part),
                    Answer::NotApplicable,
                );
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Capability, Category, Provider};

    #[test]
    fn toggle_rejects_separator() {
        let key = ItemKey::new(
            Location::Gcp,
            Capability::Frontend,
            Category::Monitoring,
            Provider::NewRelic,
        );
        let next = apply(
            &SurveyState::new(),
            &Event::ToggleItem {
                key,
                item: "a|b".into(),
            },
        );
        assert!(next.items(&key).is_empty());
    }

    #[test]
    fn unknown_location_clears_selection() {
        let state = apply(
            &SurveyState::new(),
            &Event::SelectLocation(Some(Location::Hybrid)),
        );
        let next = apply(
            &state,
            &Event::SetMeta {
                field: MetaField::LocationSelected,
                value: "moon".into(),
            },
        );
        assert_eq!(next.location, None);
    }
}
