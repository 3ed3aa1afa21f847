use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

const COMPLETE_LINK: &str = "app_type=web&loc_selected=gcp\
    &slo_exists=1&slo_latency=1&slo_availability=1&slo_error_budget=1\
    &dr_plan=1&dr_rto_rpo=1&dr_tested=1\
    &bp_runbooks=1&bp_spof=1&bp_noise=1&bp_mttr=1\
    &loc_gcp_frontend=0&loc_gcp_backend=0&loc_gcp_apis=0";

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    dir.child("config.toml").write_str("").expect("config");
    dir
}

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sre-readiness").expect("bin");
    cmd.env_remove("SRE_READINESS_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.child("config.toml").path())
        .arg("--state-dir")
        .arg(dir.child("state").path());
    cmd
}

fn show_json(dir: &TempDir) -> Value {
    let output = cli(dir).args(["show", "--json"]).output().expect("show");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("json report")
}

fn complete(dir: &TempDir) {
    cli(dir)
        .args(["--link", COMPLETE_LINK, "set", "app_name", "Payments"])
        .assert()
        .success();
    cli(dir).args(["set", "po_name", "Dana"]).assert().success();
}

#[test]
fn set_prints_the_new_link() {
    let dir = workspace();
    cli(&dir)
        .args(["set", "app_type", "web"])
        .assert()
        .success()
        .stdout("app_type=web\n");
    cli(&dir)
        .args(["set", "dr_plan", "yes"])
        .assert()
        .success()
        .stdout("app_type=web&dr_plan=1\n");
}

#[test]
fn names_stay_out_of_the_link() {
    let dir = workspace();
    cli(&dir)
        .args(["set", "app_name", "Payments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payments").not());

    let report = show_json(&dir);
    assert_eq!(report["app_name"], "Payments");
    assert_eq!(report["link"], "");
    assert_eq!(report["side_channel_available"], true);

    let stored: Vec<_> = fs::read_dir(dir.child("state").path())
        .expect("state dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].starts_with("secure-"));
}

#[test]
fn names_in_a_given_link_are_never_echoed() {
    let dir = workspace();
    cli(&dir)
        .args(["--link", "?app_name=Secret&po_name=Dana&dr_plan=1&junk=zz", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Link: dr_plan=1\n"))
        .stdout(predicate::str::contains("Secret").not())
        .stdout(predicate::str::contains("junk").not());
}

#[test]
fn read_only_commands_leave_the_disk_alone() {
    let dir = workspace();
    cli(&dir).arg("show").assert().success();
    cli(&dir).arg("export").assert().failure();
    dir.child("state").assert(predicate::path::missing());
}

#[test]
fn onboarding_stats_carry_colour_bands() {
    let dir = workspace();
    let link = "loc_selected=gcp&loc_gcp_backend=1&loc_gcp_backend_reporting=1\
        &loc_gcp_backend_stip=na\
        &loc_gcp_backend_monitoring_newrelic=APM+%28dashboard%29%7CSYNT%7CINFRA+%28dashboard%29%7COther\
        &loc_gcp_backend_alerting_newrelic=Other";

    let output = cli(&dir)
        .args(["--link", link, "show", "--json"])
        .output()
        .expect("show");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    let backend = &report["onboarding"]["backend"];
    assert_eq!(backend["monitoring"]["value"], "100%");
    assert_eq!(backend["monitoring"]["band"], "green");
    assert_eq!(backend["alerting"]["value"], "33%");
    assert_eq!(backend["alerting"]["band"], "orange");
    assert_eq!(backend["overall"]["value"], "75%");
    assert_eq!(report["onboarding"]["frontend"]["overall"]["band"], Value::Null);

    cli(&dir)
        .args(["--link", "loc_selected=gcp&loc_gcp_apis=1&loc_gcp_apis_reporting=0", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overall 0% (red)"));
}

#[test]
fn origins_keep_separate_state() {
    let dir = workspace();
    cli(&dir)
        .args(["--origin", "team-a", "set", "app_type", "batch"])
        .assert()
        .success();
    cli(&dir)
        .args(["--origin", "team-b", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batch").not());
}

#[test]
fn capability_no_cascades_in_one_write() {
    let dir = workspace();
    cli(&dir).args(["location", "gcp"]).assert().success();
    cli(&dir)
        .args(["set", "loc_gcp_backend", "no"])
        .assert()
        .success()
        .stdout(
            "loc_selected=gcp&loc_gcp_backend=0&loc_gcp_backend_reporting=na&loc_gcp_backend_stip=na\n",
        );
}

#[test]
fn invalid_input_is_rejected_without_writing() {
    let dir = workspace();
    cli(&dir).args(["set", "dr_tested", "1"]).assert().success();
    cli(&dir)
        .args(["set", "dr_tested", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid answer 'maybe'"));
    cli(&dir)
        .args(["set", "loc_mars_frontend", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
    cli(&dir)
        .args(["toggle", "loc_gcp_frontend_monitoring_newrelic", "Made up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not offered"));
    cli(&dir)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"link\": \"dr_tested=1\""));
}

#[test]
fn toggle_adds_and_removes_items() {
    let dir = workspace();
    let key = "loc_onprem_apis_alerting_splunk";
    cli(&dir)
        .args(["toggle", key, "Critical errors"])
        .assert()
        .success()
        .stdout("loc_onprem_apis_alerting_splunk=Critical+errors\n");
    cli(&dir)
        .args(["toggle", key, "Other"])
        .assert()
        .success()
        .stdout("loc_onprem_apis_alerting_splunk=Critical+errors%7COther\n");
    cli(&dir)
        .args(["toggle", key, "Critical errors"])
        .assert()
        .success()
        .stdout("loc_onprem_apis_alerting_splunk=Other\n");
}

#[test]
fn export_is_gated() {
    let dir = workspace();
    cli(&dir)
        .args(["export", "--out"])
        .arg(dir.child("out").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please fill in both Application name and PO Name before exporting.",
        ));

    cli(&dir).args(["set", "app_name", "Payments"]).assert().success();
    cli(&dir).args(["set", "po_name", "Dana"]).assert().success();
    cli(&dir)
        .args(["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Current progress: 13% answered"));
    dir.child("out").assert(predicate::path::missing());
}

#[test]
fn completed_assessment_exports_csv_and_json() {
    let dir = workspace();
    complete(&dir);

    let report = show_json(&dir);
    assert_eq!(report["percent"], 100);
    assert_eq!(report["onboarding"]["frontend"]["overall"]["value"], "—");
    assert_eq!(report["onboarding"]["frontend"]["overall"]["band"], Value::Null);

    let out = dir.child("out");
    cli(&dir)
        .args(["export", "--date", "2026-03-07", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("sre-readiness-Payments-2026-03-07.csv\n"));
    let csv = out.child("sre-readiness-Payments-2026-03-07.csv");
    csv.assert(predicate::str::starts_with(
        "\"Application Name\",\"Payments\"\n\"PO Name\",\"Dana\"",
    ));
    csv.assert(predicate::str::ends_with(
        "\"Location: GCP\"\n\"Location: ONPREM\"\n\"Location: HYBRID\"",
    ));

    cli(&dir)
        .args(["export", "--format", "json", "--out"])
        .arg(out.path())
        .assert()
        .success();
    let json: Value = serde_json::from_str(
        &fs::read_to_string(out.child("sre-readiness.json").path()).expect("json file"),
    )
    .expect("parse");
    assert_eq!(json["po_name"], "Dana");
    assert_eq!(json["locations"]["gcp"]["apis"], false);
}

#[test]
fn email_prints_draft_and_mailto() {
    let dir = workspace();
    complete(&dir);
    cli(&dir)
        .args(["email", "--date", "2026-03-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To: sre-team@example.com"))
        .stdout(predicate::str::contains(
            "Subject: SRE Readiness Assessment - Payments",
        ))
        .stdout(predicate::str::contains("- Assessment Date: 2026-03-07"))
        .stdout(predicate::str::contains(
            "mailto:sre-team@example.com?subject=SRE%20Readiness%20Assessment%20-%20Payments&body=Dear%20SRE%20Team",
        ));
}

#[test]
fn config_file_sets_recipient_and_base_url() {
    let dir = workspace();
    dir.child("config.toml")
        .write_str(
            "recipient = \"oncall@example.com\"\nbase_url = \"https://sre.example/readiness\"\n",
        )
        .expect("config");
    cli(&dir)
        .args(["set", "bp_mttr", "na"])
        .assert()
        .success()
        .stdout("https://sre.example/readiness?bp_mttr=na\n");
    complete(&dir);
    cli(&dir)
        .args(["email", "--to", "lead@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To: lead@example.com"))
        .stdout(predicate::str::contains("oncall@example.com").not());
}

#[test]
fn reset_clears_link_and_names() {
    let dir = workspace();
    complete(&dir);
    cli(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout("Assessment reset\n");

    let report = show_json(&dir);
    assert_eq!(report["app_name"], "");
    assert_eq!(report["progress"]["answered"], 0);
    let remaining = fs::read_dir(dir.child("state").path())
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(remaining, 0);
}

#[test]
fn schema_command_prints_effective_schema() {
    let dir = workspace();
    let output = cli(&dir).arg("schema").output().expect("schema");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(schema["version"], 2);
    assert_eq!(
        schema["capabilities"],
        serde_json::json!(["frontend", "backend", "apis"])
    );

    cli(&dir)
        .args(["schema", "--json-schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"SurveySchema\""));
}
