use thiserror::Error;
use tracing::{debug, warn};

use crate::answer::{AnswerInput, AnswerParseError};
use crate::link::{self, SensitiveFields};
use crate::reducer::{self, Event, ITEM_SEPARATOR};
use crate::schema::{ItemKey, Location, MetaField, QuestionKey, SurveySchema};
use crate::side_channel::{SideChannel, secure_key};
use crate::state::SurveyState;

/// Errors raised before a write is attempted. The stored link is untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    InvalidAnswer(#[from] AnswerParseError),
    #[error("item '{0}' contains the reserved '|' separator")]
    ReservedSeparator(String),
    #[error("'{item}' is not offered under {key}")]
    NotInCatalog { key: ItemKey, item: String },
}

/// Binds the shareable link and the side channel to the pure reducer.
///
/// The link is the source of truth: every read decodes it afresh and every
/// write is a full read-modify-write that replaces it in one assignment.
pub struct AnswerStore<S> {
    schema: SurveySchema,
    query: String,
    side: S,
    side_available: bool,
}

impl<S: SideChannel> AnswerStore<S> {
    /// Opens a store on `link`. The incoming query is normalised right away,
    /// so names or unknown parameters in it never reach [`AnswerStore::link`].
    pub fn new(schema: SurveySchema, link: &str, mut side: S) -> Self {
        let side_available = side.probe();
        if !side_available {
            warn!("side channel unavailable; application and owner names will not persist");
        }
        Self {
            schema,
            query: link::encode(&link::decode(link, &SensitiveFields::default())),
            side,
            side_available,
        }
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    /// Current shareable query string, without leading `?`.
    pub fn link(&self) -> &str {
        &self.query
    }

    pub fn side_channel(&self) -> &S {
        &self.side
    }

    pub fn side_channel_available(&self) -> bool {
        self.side_available
    }

    pub fn into_parts(self) -> (String, S) {
        (self.query, self.side)
    }

    pub fn sensitive(&self) -> SensitiveFields {
        SensitiveFields {
            app_name: self.read_secure(MetaField::AppName),
            po_name: self.read_secure(MetaField::PoName),
        }
    }

    pub fn get_state(&self) -> SurveyState {
        link::decode(&self.query, &self.sensitive())
    }

    /// Applies one event and returns the re-derived state.
    pub fn dispatch(&mut self, event: Event) -> SurveyState {
        let current = self.get_state();
        let next = reducer::apply(&current, &event);
        let query = link::encode(&next);

        match &event {
            Event::SetMeta { field, value } if field.is_sensitive() => {
                self.write_secure(*field, value);
            }
            Event::Reset => {
                self.clear_secure(MetaField::AppName);
                self.clear_secure(MetaField::PoName);
            }
            _ => {}
        }

        self.query = query;
        self.get_state()
    }

    pub fn set_answer(
        &mut self,
        key: QuestionKey,
        value: impl Into<AnswerInput>,
    ) -> Result<SurveyState, StoreError> {
        let answer = value.into().resolve()?;
        Ok(self.dispatch(Event::SetAnswer { key, answer }))
    }

    pub fn set_meta(&mut self, field: MetaField, value: &str) -> SurveyState {
        self.dispatch(Event::SetMeta {
            field,
            value: value.to_string(),
        })
    }

    pub fn select_location(&mut self, location: Option<Location>) -> SurveyState {
        self.dispatch(Event::SelectLocation(location))
    }

    pub fn toggle_multiselect(&mut self, key: ItemKey, item: &str) -> Result<SurveyState, StoreError> {
        if item.contains(ITEM_SEPARATOR) {
            return Err(StoreError::ReservedSeparator(item.to_string()));
        }
        let offered = self
            .schema
            .providers(key.location, key.category)
            .contains(&key.provider)
            && self
                .schema
                .catalog(key.provider, key.category)
                .iter()
                .any(|candidate| candidate == item);
        if !offered {
            return Err(StoreError::NotInCatalog {
                key,
                item: item.to_string(),
            });
        }
        Ok(self.dispatch(Event::ToggleItem {
            key,
            item: item.to_string(),
        }))
    }

    /// Clears the link and both sensitive fields.
    pub fn reset(&mut self) -> SurveyState {
        self.dispatch(Event::Reset)
    }

    fn read_secure(&self, field: MetaField) -> String {
        if !self.side_available {
            return String::new();
        }
        match self.side.get(&secure_key(field)) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                debug!(%err, field = field.as_str(), "side channel read failed");
                String::new()
            }
        }
    }

    fn write_secure(&mut self, field: MetaField, value: &str) {
        if !self.side_available {
            return;
        }
        if let Err(err) = self.side.set(&secure_key(field), value) {
            warn!(%err, field = field.as_str(), "side channel write failed");
        }
    }

    fn clear_secure(&mut self, field: MetaField) {
        if !self.side_available {
            return;
        }
        if let Err(err) = self.side.remove(&secure_key(field)) {
            warn!(%err, field = field.as_str(), "side channel remove failed");
        }
    }
}
