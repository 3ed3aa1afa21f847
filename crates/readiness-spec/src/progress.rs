use serde::Serialize;

use crate::answer::Answer;
use crate::schema::{FlatQuestion, QuestionKey, ScopedPart, SurveySchema};
use crate::state::SurveyState;

/// Name, owner, type and location.
const METADATA_QUESTIONS: usize = 4;

/// Completion counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    /// `round(100 * answered / total)`, halves rounding up.
    pub fn percent(&self) -> u8 {
        rounded_percent(self.answered, self.total).unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.percent() == 100
    }
}

pub(crate) fn rounded_percent(part: usize, whole: usize) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    let pct = (200 * part + whole) / (2 * whole);
    Some(pct.min(100) as u8)
}

pub fn compute_progress(state: &SurveyState, schema: &SurveySchema) -> Progress {
    let mut total = METADATA_QUESTIONS;
    let mut answered = [
        !state.app_name.trim().is_empty(),
        !state.po_name.trim().is_empty(),
        !state.app_type.is_empty(),
        state.location.is_some(),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count();

    total += FlatQuestion::TOP_LEVEL.len();
    answered += FlatQuestion::TOP_LEVEL
        .iter()
        .filter(|question| state.answer(**question).is_set())
        .count();

    total += FlatQuestion::SLO_DETAILS.len();
    answered += match state.answer(FlatQuestion::SloExists) {
        Answer::Yes => FlatQuestion::SLO_DETAILS
            .iter()
            .filter(|question| state.answer(**question).is_set())
            .count(),
        Answer::No | Answer::NotApplicable => FlatQuestion::SLO_DETAILS.len(),
        Answer::Unset => 0,
    };

    if let Some(location) = state.location {
        for capability in &schema.capabilities {
            let own = state.answer(QuestionKey::capability(location, *capability));
            total += 1 + ScopedPart::DEPENDENTS.len();
            match own {
                Answer::Yes => {
                    answered += 1;
                    answered += ScopedPart::DEPENDENTS
                        .iter()
                        .filter(|part| {
                            state
                                .answer(QuestionKey::scoped(location, *capability, **part))
                                .is_set()
                        })
                        .count();
                }
                Answer::No | Answer::NotApplicable => {
                    answered += 1 + ScopedPart::DEPENDENTS.len();
                }
                Answer::Unset => {}
            }
        }
    }

    Progress { answered, total }
}
