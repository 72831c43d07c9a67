use appeals_cli::{command, run, MapArgs};
use appeals_core::{MapperPage, Permission};
use appeals_test_utils::{appeal_json, householder_appeal, planning_appeal};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn args(appeal: &Path, page: MapperPage) -> MapArgs {
    MapArgs {
        appeal: appeal.to_path_buf(),
        page,
        route: None,
        permissions: Vec::new(),
        config: None,
        representations: None,
        only: Vec::new(),
        today: NaiveDate::from_ymd_opt(2024, 6, 1),
        verbose: false,
    }
}

#[test]
fn parses_repeated_flags() {
    let matches = command()
        .try_get_matches_from([
            "appeals-map",
            "--appeal",
            "appeal.json",
            "--page",
            "appellant-case",
            "--permission",
            "update-case",
            "--permission",
            "manage-costs",
            "--only",
            "green-belt",
            "--today",
            "2024-06-01",
        ])
        .unwrap();
    let parsed = MapArgs::from_matches(&matches).unwrap();
    assert_eq!(parsed.page, MapperPage::AppellantCase);
    assert_eq!(parsed.permissions, vec![Permission::UpdateCase, Permission::ManageCosts]);
    assert_eq!(parsed.only, vec!["green-belt".to_string()]);
    assert_eq!(parsed.today, NaiveDate::from_ymd_opt(2024, 6, 1));
}

#[test]
fn rejects_unknown_permission() {
    let matches = command()
        .try_get_matches_from([
            "appeals-map",
            "--appeal",
            "a.json",
            "--page",
            "appeal-details",
            "--permission",
            "root",
        ])
        .unwrap();
    assert!(MapArgs::from_matches(&matches).is_err());
}

#[test]
fn rejects_unknown_page() {
    assert!(command()
        .try_get_matches_from(["appeals-map", "--appeal", "a.json", "--page", "timeline"])
        .is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn maps_selected_fields_from_file() {
    let file = write_temp(&appeal_json(&householder_appeal()));
    let mut invocation = args(file.path(), MapperPage::LpaQuestionnaire);
    invocation.only = vec!["listed-buildings".to_string()];

    let output = run(&invocation).await.unwrap();
    let page = output["lpaQuestionnaire"].as_object().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(
        page["listed-buildings"]["display"]["summaryListItem"]["value"]["text"],
        "Grade II barn"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn permissions_and_route_reach_actions() {
    let file = write_temp(&appeal_json(&planning_appeal()));
    let mut invocation = args(file.path(), MapperPage::AppealDetails);
    invocation.route = Some("/cases/2".to_string());
    invocation.permissions = vec![Permission::UpdateCase];
    invocation.only = vec!["appellant".to_string()];

    let output = run(&invocation).await.unwrap();
    let action = &output["appeal"]["appellant"]["display"]["summaryListItem"]["actions"]["items"][0];
    assert_eq!(action["href"], "/cases/2/service-user/change/appellant");
    assert_eq!(action["text"], "Change");
}

#[tokio::test(flavor = "current_thread")]
async fn config_file_changes_date_format() {
    let appeal = write_temp(&appeal_json(&householder_appeal()));
    let config = write_temp("date_format = \"%d/%m/%Y\"\n");
    let mut invocation = args(appeal.path(), MapperPage::AppealDetails);
    invocation.config = Some(config.path().to_path_buf());
    invocation.only = vec!["start-date".to_string()];

    let output = run(&invocation).await.unwrap();
    assert_eq!(
        output["appeal"]["start-date"]["display"]["summaryListItem"]["value"]["text"],
        "20/05/2024"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn representations_file_feeds_final_comments() {
    let appeal = write_temp(&appeal_json(&planning_appeal()));
    let comments = write_temp(r#"{"appellant": "valid", "lpa": "awaiting_review"}"#);
    let mut invocation = args(appeal.path(), MapperPage::AppealDetails);
    invocation.representations = Some(comments.path().to_path_buf());
    invocation.only = vec!["appellant-final-comments".to_string(), "lpa-final-comments".to_string()];

    let output = run(&invocation).await.unwrap();
    let value = |id: &str| output["appeal"][id]["display"]["summaryListItem"]["value"]["text"].clone();
    assert_eq!(value("appellant-final-comments"), "Accepted");
    assert_eq!(value("lpa-final-comments"), "Ready to review");
}

#[tokio::test(flavor = "current_thread")]
async fn without_representations_final_comments_are_not_received() {
    let appeal = write_temp(&appeal_json(&planning_appeal()));
    let mut invocation = args(appeal.path(), MapperPage::AppealDetails);
    invocation.only = vec!["lpa-final-comments".to_string()];

    let output = run(&invocation).await.unwrap();
    assert_eq!(
        output["appeal"]["lpa-final-comments"]["display"]["summaryListItem"]["value"]["text"],
        "Not received"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_aggregate_is_reported() {
    let file = write_temp("{\"appealId\": 1}");
    let err = run(&args(file.path(), MapperPage::AppealDetails))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("cannot load appeal"));
}

#[tokio::test(flavor = "current_thread")]
async fn missing_file_is_reported() {
    let err = run(&args(Path::new("/nonexistent/appeal.json"), MapperPage::AppealDetails))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cannot read"));
}
