use crate::answer::Answer;
use crate::export::snapshot::{CapabilityAnswers, CollectedAnswers, ProviderItems};
use crate::schema::{FlatQuestion, MetaField, ScopedPart};

type Row = Vec<String>;

fn pair(label: impl Into<String>, value: impl Into<String>) -> Row {
    vec![label.into(), value.into()]
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Renders the snapshot as sectioned, fully quoted CSV.
///
/// Export gating is the caller's job; this renders whatever it is given.
pub fn to_csv(data: &CollectedAnswers) -> String {
    let mut rows: Vec<Row> = Vec::new();

    rows.push(pair(MetaField::AppName.title(), &data.app_name));
    rows.push(pair(MetaField::PoName.title(), &data.po_name));
    rows.push(pair(MetaField::AppType.title(), &data.app_type));
    if data.app_type == "other" {
        rows.push(pair(MetaField::AppTypeOther.title(), &data.app_type_other));
    }
    rows.push(Row::new());

    let slo = data.answer(FlatQuestion::SloExists);
    rows.push(pair(FlatQuestion::SloExists.title(), slo.label()));
    if slo == Answer::Yes {
        for detail in FlatQuestion::SLO_DETAILS {
            rows.push(pair(
                format!("  {}", detail.title()),
                data.answer(*detail).label(),
            ));
        }
    }
    rows.push(Row::new());

    for section in [FlatQuestion::DISASTER_RECOVERY, FlatQuestion::BEST_PRACTICES] {
        for question in section {
            rows.push(pair(question.title(), data.answer(*question).label()));
        }
        rows.push(Row::new());
    }

    for location in &data.locations {
        rows.push(vec![format!(
            "Location: {}",
            location.location.as_str().to_uppercase()
        )]);
        for capability in &location.capabilities {
            if capability.answer == Answer::Yes {
                capability_rows(&mut rows, capability);
            }
        }
    }

    rows.iter()
        .map(|row| row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capability_rows(rows: &mut Vec<Row>, entry: &CapabilityAnswers) {
    rows.push(pair(
        format!(
            "  {} {}",
            entry.capability.title(),
            ScopedPart::Capability.title()
        ),
        Answer::Yes.label(),
    ));
    provider_rows(rows, "    ", "Monitoring", &entry.monitoring);
    provider_rows(rows, "    ", "Alerting", &entry.alerting);
    rows.push(pair(
        format!("    {}", ScopedPart::Reporting.title()),
        entry.reporting.label(),
    ));
    rows.push(pair(
        format!("    {}", ScopedPart::Integration.title()),
        entry.integration.label(),
    ));
    if entry.integration == Answer::Yes {
        provider_rows(rows, "      ", "Integration", &entry.integration_items);
    }
}

fn provider_rows(rows: &mut Vec<Row>, indent: &str, suffix: &str, items: &ProviderItems) {
    for (provider, selected) in items {
        if !selected.is_empty() {
            rows.push(pair(
                format!("{indent}{provider} {suffix}"),
                selected.join(", "),
            ));
        }
    }
}
