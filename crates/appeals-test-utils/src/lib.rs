//! Testing utilities for the appeals workspace
//!
//! Shared fixtures: populated aggregates, sessions, requests and mappers.

#![allow(missing_docs)]

use appeals_components::{
    Document, DocumentFolder, DocumentVersion, Reason, RedactionStatus, VirusCheckStatus,
};
use appeals_core::{
    Address, Appeal, AppealMapper, AppealMapperRequest, AppealStatus, AppealType, AppellantCase,
    ApplicationDecision, CoreError, Event, FinalCommentsSummary, InMemoryRepresentations,
    LpaQuestionnaire, MapperConfig, MapperPage, Permission, ProcedureType, RepresentationSource,
    ServiceUser, Session, SessionEvaluator, Timetable, User, ValidationOutcome,
    ValidationOutcomeKind,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub const TODAY: (i32, u32, u32) = (2024, 6, 1);

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

pub fn route(appeal_id: u64) -> String {
    format!("/appeals-service/appeal-details/{appeal_id}")
}

pub fn received_folder(folder_id: u64, path: &str, names: &[&str]) -> DocumentFolder {
    names
        .iter()
        .enumerate()
        .fold(DocumentFolder::new(folder_id, path), |folder, (i, name)| {
            folder.with_document(Document {
                id: format!("{folder_id}-{i}"),
                name: (*name).to_string(),
                latest_version: Some(DocumentVersion {
                    version: 1,
                    virus_check_status: VirusCheckStatus::Scanned,
                    redaction_status: RedactionStatus::NoRedactionRequired,
                }),
            })
        })
}

pub fn empty_folder(folder_id: u64, path: &str) -> DocumentFolder {
    DocumentFolder::new(folder_id, path)
}

pub fn appellant() -> ServiceUser {
    ServiceUser {
        first_name: Some("Roger".to_string()),
        last_name: Some("Simmons".to_string()),
        email: Some("roger@example.com".to_string()),
        ..ServiceUser::default()
    }
}

pub fn site() -> Address {
    Address {
        address_line1: Some("96 The Avenue".to_string()),
        town: Some("Leftfield".to_string()),
        postcode: Some("XX12 3XX".to_string()),
        ..Address::default()
    }
}

pub fn appellant_case() -> AppellantCase {
    AppellantCase {
        owns_all_land: Some(true),
        is_green_belt: Some(false),
        site_access_required: Some(true),
        site_access_details: Some("Access via the side gate".to_string()),
        has_health_and_safety_issues: Some(false),
        application_date: Some("2024-01-15".to_string()),
        development_description: Some("Single storey rear extension".to_string()),
        application_decision: Some(ApplicationDecision::Refused),
        applied_for_costs: Some(false),
        is_agricultural_holding: Some(false),
        application_form: Some(received_folder(20, "appellant-case/application-form", &["form.pdf"])),
        appeal_statement: Some(empty_folder(21, "appellant-case/appeal-statement")),
        validation: Some(ValidationOutcome {
            outcome: ValidationOutcomeKind::Incomplete,
            reasons: vec![Reason::named("Documents missing").with_text("Site plan")],
        }),
        ..AppellantCase::default()
    }
}

pub fn lpa_questionnaire() -> LpaQuestionnaire {
    LpaQuestionnaire {
        is_correct_appeal_type: Some(true),
        is_conservation_area: Some(false),
        listed_building_details: vec!["Grade II barn".to_string()],
        is_green_belt: Some(false),
        notification_methods: vec!["Site notice".to_string(), "Letter".to_string()],
        site_access_required: Some(false),
        neighbouring_site_access_required: Some(false),
        has_health_and_safety_issues: Some(true),
        health_and_safety_details: Some("Steep drop at rear".to_string()),
        has_extra_conditions: Some(false),
        officer_report: Some(received_folder(30, "lpa-questionnaire/officer-report", &["report.pdf"])),
        ..LpaQuestionnaire::default()
    }
}

/// Householder appeal at the LPA questionnaire stage, every section present
pub fn householder_appeal() -> Appeal {
    let mut appeal = Appeal::new(
        1,
        "APP/Q9999/D/24/1000001",
        AppealType::Householder,
        AppealStatus::LpaQuestionnaire,
        "Wiltshire Council",
    );
    appeal.planning_application_reference = Some("48269/APP/2024/1482".to_string());
    appeal.procedure_type = Some(ProcedureType::Written);
    appeal.appellant = Some(appellant());
    appeal.appeal_site = Some(site());
    appeal.case_officer = Some(User {
        id: "co-1".to_string(),
        name: Some("Casey Officer".to_string()),
        email: None,
    });
    appeal.start_date = Some("2024-05-20".to_string());
    appeal.timetable = Some(Timetable {
        lpa_questionnaire_due_date: Some("2024-06-10".to_string()),
        ..Timetable::default()
    });
    appeal.appellant_case = Some(appellant_case());
    appeal.lpa_questionnaire = Some(lpa_questionnaire());
    appeal
}

/// Planning appeal heard at a hearing, at the event stage
pub fn planning_appeal() -> Appeal {
    let mut appeal = householder_appeal();
    appeal.appeal_id = 2;
    appeal.appeal_reference = "APP/Q9999/W/24/2000002".to_string();
    appeal.appeal_type = AppealType::PlanningAppeal;
    appeal.status = AppealStatus::Event;
    appeal.procedure_type = Some(ProcedureType::Hearing);
    appeal.timetable = Some(Timetable {
        lpa_questionnaire_due_date: Some("2024-03-10".to_string()),
        lpa_statement_due_date: Some("2024-04-10".to_string()),
        final_comments_due_date: Some("2024-05-10".to_string()),
    });
    appeal.start_date = Some("2024-02-20".to_string());
    appeal.hearing = Some(Event {
        start_time: "2024-07-15T09:30:00Z".to_string(),
        address: Some(site()),
        estimated_days: Some(1),
    });
    appeal.costs.appellant_application_folder =
        Some(received_folder(40, "costs/appellant/application", &["costs.pdf"]));
    appeal
}

pub fn appeal_json(appeal: &Appeal) -> String {
    serde_json::to_string(appeal).unwrap()
}

pub fn session_with(permissions: &[Permission]) -> Arc<Session> {
    Arc::new(Session::default().with_permissions(permissions.iter().copied()))
}

pub fn full_session() -> Arc<Session> {
    session_with(&Permission::ALL)
}

pub fn read_only_session() -> Arc<Session> {
    session_with(&[])
}

pub fn request(appeal: Appeal, session: Arc<Session>) -> AppealMapperRequest {
    let route = route(appeal.appeal_id);
    AppealMapperRequest::new(Arc::new(appeal), route, session, today())
}

pub fn mapper_with(
    page: MapperPage,
    config: MapperConfig,
    source: Arc<dyn RepresentationSource>,
) -> AppealMapper {
    AppealMapper::new(page, Arc::new(config), Arc::new(SessionEvaluator::new()), source).unwrap()
}

pub fn mapper(page: MapperPage) -> AppealMapper {
    mapper_with(page, MapperConfig::default(), Arc::new(InMemoryRepresentations::new()))
}

pub fn representations(appeal_id: u64, summary: FinalCommentsSummary) -> Arc<InMemoryRepresentations> {
    let store = InMemoryRepresentations::new();
    store.insert(appeal_id, summary);
    Arc::new(store)
}

/// Source whose back end is down
#[derive(Debug, Default)]
pub struct UnavailableRepresentations;

#[async_trait]
impl RepresentationSource for UnavailableRepresentations {
    async fn final_comments(&self, appeal_id: u64) -> Result<FinalCommentsSummary, CoreError> {
        Err(CoreError::SideLoad {
            appeal_id,
            reason: "representation service unavailable".to_string(),
        })
    }
}
