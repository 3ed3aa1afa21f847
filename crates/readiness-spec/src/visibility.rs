use crate::schema::{FlatQuestion, QuestionKey, ScopedPart, SurveySchema};
use crate::state::SurveyState;

/// Drill-down block key (the parent question's link key) to visibility.
pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Resolves which drill-down blocks are shown.
///
/// Location blocks exist only for the selected location; nothing is listed
/// for the others.
pub fn resolve_drilldowns(state: &SurveyState, schema: &SurveySchema) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    let slo = QuestionKey::Flat(FlatQuestion::SloExists);
    map.insert(slo.to_string(), state.answer(slo).is_yes());

    let Some(location) = state.location else {
        return map;
    };

    for capability in &schema.capabilities {
        let own = QuestionKey::capability(location, *capability);
        let integration = QuestionKey::scoped(location, *capability, ScopedPart::Integration);
        let capability_open = state.answer(own).is_yes();
        map.insert(own.to_string(), capability_open);
        map.insert(
            integration.to_string(),
            capability_open && state.answer(integration).is_yes(),
        );
    }

    map
}
