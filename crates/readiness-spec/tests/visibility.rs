use readiness_spec::{
    Answer, Capability, FlatQuestion, Location, QuestionKey, ScopedPart, SurveySchema,
    SurveyState, resolve_drilldowns,
};

#[test]
fn slo_block_follows_slo_answer() {
    let schema = SurveySchema::canonical();
    let mut state = SurveyState::new();
    let map = resolve_drilldowns(&state, &schema);
    assert_eq!(map.get("slo_exists"), Some(&false));
    assert_eq!(map.len(), 1);

    state.set_answer(FlatQuestion::SloExists, Answer::Yes);
    assert_eq!(resolve_drilldowns(&state, &schema).get("slo_exists"), Some(&true));

    state.set_answer(FlatQuestion::SloExists, Answer::NotApplicable);
    assert_eq!(resolve_drilldowns(&state, &schema).get("slo_exists"), Some(&false));
}

#[test]
fn capability_blocks_only_for_selected_location() {
    let schema = SurveySchema::canonical();
    let mut state = SurveyState::new();
    state.location = Some(Location::OnPrem);
    state.set_answer(
        QuestionKey::capability(Location::OnPrem, Capability::Backend),
        Answer::Yes,
    );
    state.set_answer(
        QuestionKey::capability(Location::Gcp, Capability::Frontend),
        Answer::Yes,
    );

    let map = resolve_drilldowns(&state, &schema);
    assert_eq!(map.get("loc_onprem_backend"), Some(&true));
    assert_eq!(map.get("loc_onprem_frontend"), Some(&false));
    assert_eq!(map.get("loc_gcp_frontend"), None);
    assert_eq!(map.len(), 1 + 2 * schema.capabilities.len());
}

#[test]
fn integration_block_needs_capability_and_integration() {
    let schema = SurveySchema::canonical();
    let mut state = SurveyState::new();
    state.location = Some(Location::Hybrid);
    let integration = QuestionKey::scoped(Location::Hybrid, Capability::Apis, ScopedPart::Integration);
    state.set_answer(integration, Answer::Yes);
    assert_eq!(
        resolve_drilldowns(&state, &schema).get("loc_hybrid_apis_stip"),
        Some(&false)
    );

    state.set_answer(
        QuestionKey::capability(Location::Hybrid, Capability::Apis),
        Answer::Yes,
    );
    assert_eq!(
        resolve_drilldowns(&state, &schema).get("loc_hybrid_apis_stip"),
        Some(&true)
    );
}
