use std::collections::BTreeMap;

use crate::answer::Answer;
use crate::schema::{ItemKey, Location, MetaField, QuestionKey};

/// Fully-populated answer snapshot.
///
/// Question and item maps are sparse: a missing question reads as
/// [`Answer::Unset`] and a missing item set reads as empty, so two states
/// that answer the same questions always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyState {
    pub app_name: String,
    pub po_name: String,
    pub app_type: String,
    pub app_type_other: String,
    pub location: Option<Location>,
    answers: BTreeMap<QuestionKey, Answer>,
    items: BTreeMap<ItemKey, Vec<String>>,
}

impl SurveyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, key: impl Into<QuestionKey>) -> Answer {
        self.answers.get(&key.into()).copied().unwrap_or_default()
    }

    pub fn set_answer(&mut self, key: impl Into<QuestionKey>, answer: Answer) {
        let key = key.into();
        if answer.is_set() {
            self.answers.insert(key, answer);
        } else {
            self.answers.remove(&key);
        }
    }

    pub fn items(&self, key: &ItemKey) -> &[String] {
        self.items.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the item set at `key`, dropping duplicates and keeping first-seen order.
    pub fn set_items(&mut self, key: ItemKey, items: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            if !item.is_empty() && !unique.contains(&item) {
                unique.push(item);
            }
        }
        if unique.is_empty() {
            self.items.remove(&key);
        } else {
            self.items.insert(key, unique);
        }
    }

    pub fn meta(&self, field: MetaField) -> String {
        match field {
            MetaField::AppName => self.app_name.clone(),
            MetaField::PoName => self.po_name.clone(),
            MetaField::AppType => self.app_type.clone(),
            MetaField::AppTypeOther => self.app_type_other.clone(),
            MetaField::LocationSelected => self
                .location
                .map(|location| location.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Explicitly answered questions, in key order.
    pub fn answered(&self) -> impl Iterator<Item = (&QuestionKey, &Answer)> {
        self.answers.iter()
    }

    /// Non-empty item sets, in key order.
    pub fn item_sets(&self) -> impl Iterator<Item = (&ItemKey, &Vec<String>)> {
        self.items.iter()
    }

    /// Copy of this state with both sensitive fields blanked.
    pub fn without_sensitive(&self) -> Self {
        Self {
            app_name: String::new(),
            po_name: String::new(),
            ..self.clone()
        }
    }
}
