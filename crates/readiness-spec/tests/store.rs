use readiness_spec::{
    Answer, AnswerStore, Capability, Category, DisabledSideChannel, FlatQuestion, ItemKey,
    Location, MemorySideChannel, MetaField, Provider, QuestionKey, ScopedPart, SideChannel,
    StoreError, SurveySchema,
};

fn store(link: &str) -> AnswerStore<MemorySideChannel> {
    AnswerStore::new(SurveySchema::canonical(), link, MemorySideChannel::new())
}

#[test]
fn names_go_to_side_channel_only() {
    let mut store = store("");
    let state = store.set_meta(MetaField::AppName, "Payments");
    assert_eq!(state.app_name, "Payments");
    assert!(!store.link().contains("Payments"));
    assert!(!store.link().contains("app_name"));
    assert_eq!(
        store.side_channel().get("secure_app_name").expect("read"),
        Some("Payments".to_string())
    );

    let state = store.set_meta(MetaField::PoName, "Dana");
    assert_eq!(state.po_name, "Dana");
    assert_eq!(store.get_state().app_name, "Payments");
}

#[test]
fn names_in_incoming_link_are_dropped_on_open() {
    let mut store = store("https://sre.example/?app_name=Leaked&po_name=Someone&app_type=web");
    assert_eq!(store.get_state().app_name, "");
    assert_eq!(store.link(), "app_type=web");
    store
        .set_answer(FlatQuestion::DrPlan.into(), true)
        .expect("set");
    assert_eq!(store.link(), "app_type=web&dr_plan=1");
}

#[test]
fn opened_link_is_normalised() {
    let store = store("?app_name=X&dr_plan=1&junk=zz&dr_plan=0");
    assert!(!store.link().contains("app_name"));
    assert_eq!(store.link(), "dr_plan=1");
}

#[test]
fn disabled_side_channel_degrades_to_empty_names() {
    let mut store = AnswerStore::new(SurveySchema::canonical(), "", DisabledSideChannel);
    assert!(!store.side_channel_available());
    let state = store.set_meta(MetaField::AppName, "Payments");
    assert_eq!(state.app_name, "");
    let state = store.set_meta(MetaField::AppType, "web");
    assert_eq!(state.app_type, "web");
}

#[test]
fn set_answer_accepts_raw_values() {
    let mut store = store("");
    let key = QuestionKey::Flat(FlatQuestion::BpNoise);
    assert_eq!(store.set_answer(key, "yes").expect("yes").answer(key), Answer::Yes);
    assert_eq!(store.set_answer(key, false).expect("bool").answer(key), Answer::No);
    assert_eq!(
        store.set_answer(key, "na").expect("na").answer(key),
        Answer::NotApplicable
    );
    assert_eq!(store.set_answer(key, "").expect("clear").answer(key), Answer::Unset);
}

#[test]
fn invalid_answer_leaves_link_untouched() {
    let mut store = store("dr_tested=1");
    let err = store
        .set_answer(FlatQuestion::DrTested.into(), "maybe")
        .expect_err("invalid");
    assert!(matches!(err, StoreError::InvalidAnswer(_)));
    assert_eq!(store.link(), "dr_tested=1");
}

#[test]
fn capability_cascade_lands_in_the_same_write() {
    let mut store = store("loc_selected=gcp");
    store
        .set_answer(QuestionKey::capability(Location::Gcp, Capability::Backend), false)
        .expect("set");
    assert_eq!(
        store.link(),
        "loc_selected=gcp&loc_gcp_backend=0&loc_gcp_backend_reporting=na&loc_gcp_backend_stip=na"
    );
}

#[test]
fn toggle_validates_against_catalog() {
    let mut store = store("");
    let newrelic = ItemKey::new(
        Location::Gcp,
        Capability::Frontend,
        Category::Monitoring,
        Provider::NewRelic,
    );
    let state = store.toggle_multiselect(newrelic, "SYNT").expect("toggle");
    assert_eq!(state.items(&newrelic), ["SYNT".to_string()]);

    let err = store
        .toggle_multiselect(newrelic, "Made up")
        .expect_err("unknown item");
    assert!(matches!(err, StoreError::NotInCatalog { .. }));

    let err = store
        .toggle_multiselect(newrelic, "SYNT|Other")
        .expect_err("separator");
    assert!(matches!(err, StoreError::ReservedSeparator(_)));

    let splunk_at_gcp = ItemKey::new(
        Location::Gcp,
        Capability::Frontend,
        Category::Alerting,
        Provider::Splunk,
    );
    let err = store
        .toggle_multiselect(splunk_at_gcp, "Other")
        .expect_err("provider not offered");
    assert!(matches!(err, StoreError::NotInCatalog { .. }));
}

#[test]
fn integration_items_use_integration_catalog() {
    let mut store = store("");
    let key = ItemKey::new(
        Location::OnPrem,
        Capability::Apis,
        Category::Integration,
        Provider::Splunk,
    );
    let state = store.toggle_multiselect(key, "Enabled").expect("toggle");
    assert_eq!(state.items(&key).len(), 1);
    assert_eq!(store.link(), "loc_onprem_apis_stip_splunk=Enabled");
}

#[test]
fn reset_clears_link_and_names() {
    let mut store = store("app_type=web&dr_plan=1");
    store.set_meta(MetaField::AppName, "Payments");
    store.set_meta(MetaField::PoName, "Dana");
    store
        .set_answer(
            QuestionKey::scoped(Location::Gcp, Capability::Apis, ScopedPart::Reporting),
            Answer::Yes,
        )
        .expect("set");

    let state = store.reset();
    assert_eq!(state, readiness_spec::SurveyState::new());
    assert_eq!(store.link(), "");
    assert!(store.side_channel().entries().is_empty());
}
