//! Appeal aggregate
//!
//! The typed case tree submappers read from. Optional parts are `Option`s;
//! [`load_appeal`] is the one place the tree is validated and normalised, so
//! submappers never re-derive whether a value is usable.

use crate::error::AggregateError;
use appeals_components::format::parse_iso_date;
use appeals_components::{DocumentFolder, Reason};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appeal case type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealType {
    /// Householder development
    Householder,
    /// Planning appeal (S78)
    PlanningAppeal,
    /// Planning listed building and conservation area
    PlanningListedBuilding,
    /// Commercial advertisement and signs
    AdvertisementCas,
}

impl AppealType {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Householder => "Householder",
            Self::PlanningAppeal => "Planning appeal",
            Self::PlanningListedBuilding => "Planning listed building and conservation area appeal",
            Self::AdvertisementCas => "Commercial (CAS) advertisement",
        }
    }
}

impl fmt::Display for AppealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Named appeal status
///
/// The main progression is ordered; side statuses (closed, withdrawn, ...)
/// sit outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealStatus {
    /// Awaiting a case officer
    AssignCaseOfficer,
    /// Appellant case under validation
    Validation,
    /// Valid, not yet started
    ReadyToStart,
    /// Awaiting LPA questionnaire
    LpaQuestionnaire,
    /// Statements stage
    Statements,
    /// Final comments stage
    FinalComments,
    /// Event being arranged
    Event,
    /// Event arranged, not yet held
    AwaitingEvent,
    /// Awaiting the decision
    IssueDetermination,
    /// Decision issued
    Complete,
    /// Closed without decision
    Closed,
    /// Withdrawn by the appellant
    Withdrawn,
    /// Found invalid
    Invalid,
    /// Awaiting transfer to another service
    AwaitingTransfer,
    /// Transferred
    Transferred,
}

impl AppealStatus {
    /// Position in the main progression; `None` for side statuses
    #[must_use]
    pub fn progression(self) -> Option<u8> {
        match self {
            Self::AssignCaseOfficer => Some(0),
            Self::Validation => Some(1),
            Self::ReadyToStart => Some(2),
            Self::LpaQuestionnaire => Some(3),
            Self::Statements => Some(4),
            Self::FinalComments => Some(5),
            Self::Event => Some(6),
            Self::AwaitingEvent => Some(7),
            Self::IssueDetermination => Some(8),
            Self::Complete => Some(9),
            Self::Closed
            | Self::Withdrawn
            | Self::Invalid
            | Self::AwaitingTransfer
            | Self::Transferred => None,
        }
    }

    /// Whether the case has moved beyond `stage`
    ///
    /// Side statuses count as past every stage.
    #[must_use]
    pub fn is_past(self, stage: Self) -> bool {
        match (self.progression(), stage.progression()) {
            (Some(current), Some(stage)) => current > stage,
            (None, _) => true,
            (Some(_), None) => false,
        }
    }

    /// Whether the case is finished one way or another
    #[inline]
    #[must_use]
    pub fn is_closed(self) -> bool {
        self == Self::Complete || self.progression().is_none()
    }
}

/// How the appeal is heard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureType {
    /// Written representations
    Written,
    /// Hearing
    Hearing,
    /// Inquiry
    Inquiry,
}

impl ProcedureType {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Written => "Written",
            Self::Hearing => "Hearing",
            Self::Inquiry => "Inquiry",
        }
    }
}

/// Appellant or agent contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceUser {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Company or organisation
    pub organisation_name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Phone number
    pub phone_number: Option<String>,
}

impl ServiceUser {
    /// Full name, if any part is present
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Display lines: name, organisation, email, phone
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.full_name().into_iter().collect();
        lines.extend(
            [&self.organisation_name, &self.email, &self.phone_number]
                .into_iter()
                .flatten()
                .cloned(),
        );
        lines
    }

    fn normalise(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.organisation_name,
            &mut self.email,
            &mut self.phone_number,
        ] {
            blank_to_none(field);
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    /// First line
    pub address_line1: Option<String>,
    /// Second line
    pub address_line2: Option<String>,
    /// Town or city
    pub town: Option<String>,
    /// County
    pub county: Option<String>,
    /// Postcode
    pub postcode: Option<String>,
}

impl Address {
    /// Non-empty lines in postal order
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        [
            &self.address_line1,
            &self.address_line2,
            &self.town,
            &self.county,
            &self.postcode,
        ]
        .into_iter()
        .filter_map(|l| l.as_deref())
        .collect()
    }

    /// Whether every line is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    fn normalise(&mut self) {
        for field in [
            &mut self.address_line1,
            &mut self.address_line2,
            &mut self.town,
            &mut self.county,
            &mut self.postcode,
        ] {
            blank_to_none(field);
        }
    }
}

/// Caseworker or inspector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Directory id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name, falling back to email, then id
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    fn normalise(&mut self) {
        blank_to_none(&mut self.name);
        blank_to_none(&mut self.email);
    }
}

/// Timetable due dates (ISO-8601)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timetable {
    /// LPA questionnaire due
    pub lpa_questionnaire_due_date: Option<String>,
    /// LPA statement due
    pub lpa_statement_due_date: Option<String>,
    /// Final comments due
    pub final_comments_due_date: Option<String>,
}

impl Timetable {
    fn normalise(&mut self) {
        for field in [
            &mut self.lpa_questionnaire_due_date,
            &mut self.lpa_statement_due_date,
            &mut self.final_comments_due_date,
        ] {
            blank_to_none(field);
        }
    }
}

/// Hearing or inquiry arrangements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// ISO-8601 start timestamp
    pub start_time: String,
    /// Venue
    #[serde(default)]
    pub address: Option<Address>,
    /// Expected length in days
    #[serde(default)]
    pub estimated_days: Option<u32>,
}

/// Costs document folders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Costs {
    /// Appellant's costs application
    pub appellant_application_folder: Option<DocumentFolder>,
    /// LPA's costs application
    pub lpa_application_folder: Option<DocumentFolder>,
    /// Costs decision letter
    pub decision_folder: Option<DocumentFolder>,
}

/// Decision outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Appeal allowed
    Allowed,
    /// Appeal dismissed
    Dismissed,
    /// Allowed in part
    SplitDecision,
    /// Found invalid
    Invalid,
}

impl DecisionOutcome {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Allowed => "Allowed",
            Self::Dismissed => "Dismissed",
            Self::SplitDecision => "Split decision",
            Self::Invalid => "Invalid",
        }
    }
}

/// Issued decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Outcome
    pub outcome: DecisionOutcome,
    /// Decision letter date (ISO-8601)
    #[serde(default)]
    pub letter_date: Option<String>,
}

/// Validation outcome kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcomeKind {
    /// Accepted
    Valid,
    /// Missing information
    Incomplete,
    /// Found invalid
    Invalid,
}

impl ValidationOutcomeKind {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Incomplete => "Incomplete",
            Self::Invalid => "Invalid",
        }
    }
}

/// Review outcome of a submission with its reasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// Outcome
    pub outcome: ValidationOutcomeKind,
    /// Reasons given for a non-valid outcome
    #[serde(default)]
    pub reasons: Vec<Reason>,
}

/// Planning application decision the appeal is against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    /// Permission granted
    Granted,
    /// Permission refused
    Refused,
    /// No decision within the statutory period
    NotReceived,
}

impl ApplicationDecision {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Granted => "Granted",
            Self::Refused => "Refused",
            Self::NotReceived => "Not received",
        }
    }
}

/// Appellant's submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppellantCase {
    /// Appellant owns all the land
    pub owns_all_land: Option<bool>,
    /// Site is in a green belt
    pub is_green_belt: Option<bool>,
    /// Inspector needs access to the site
    pub site_access_required: Option<bool>,
    /// Access arrangements
    pub site_access_details: Option<String>,
    /// Site has safety risks
    pub has_health_and_safety_issues: Option<bool>,
    /// Safety risks described
    pub health_and_safety_details: Option<String>,
    /// Planning application date (ISO-8601)
    pub application_date: Option<String>,
    /// Development as originally described
    pub development_description: Option<String>,
    /// LPA decision on the application
    pub application_decision: Option<ApplicationDecision>,
    /// Appellant applied for costs
    pub applied_for_costs: Option<bool>,
    /// Site is part of an agricultural holding
    pub is_agricultural_holding: Option<bool>,
    /// Application form documents
    pub application_form: Option<DocumentFolder>,
    /// Appeal statement documents
    pub appeal_statement: Option<DocumentFolder>,
    /// Review outcome
    pub validation: Option<ValidationOutcome>,
}

/// Local planning authority's questionnaire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LpaQuestionnaire {
    /// LPA agrees with the appeal type
    pub is_correct_appeal_type: Option<bool>,
    /// Site is in a conservation area
    pub is_conservation_area: Option<bool>,
    /// Conservation area map and guidance
    pub conservation_area_map: Option<DocumentFolder>,
    /// Listed buildings affected
    pub listed_building_details: Vec<String>,
    /// Site is in a green belt
    pub is_green_belt: Option<bool>,
    /// How neighbours were notified
    pub notification_methods: Vec<String>,
    /// Inspector needs access to the site
    pub site_access_required: Option<bool>,
    /// Access arrangements
    pub site_access_details: Option<String>,
    /// Inspector needs a neighbour's land
    pub neighbouring_site_access_required: Option<bool>,
    /// Neighbour access arrangements
    pub neighbouring_site_access_details: Option<String>,
    /// Site has safety risks
    pub has_health_and_safety_issues: Option<bool>,
    /// Safety risks described
    pub health_and_safety_details: Option<String>,
    /// LPA proposes extra conditions
    pub has_extra_conditions: Option<bool>,
    /// Proposed conditions
    pub extra_conditions: Option<String>,
    /// Development affects a scheduled monument
    pub affects_scheduled_monument: Option<bool>,
    /// Development affects a protected species
    pub has_protected_species: Option<bool>,
    /// Environmental statement required
    pub is_environmental_statement_required: Option<bool>,
    /// Planning officer's report
    pub officer_report: Option<DocumentFolder>,
    /// Review outcome
    pub validation: Option<ValidationOutcome>,
}

/// Appeal case aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appeal {
    /// Case id
    pub appeal_id: u64,
    /// Public case reference
    pub appeal_reference: String,
    /// Case type
    pub appeal_type: AppealType,
    /// Current status
    pub status: AppealStatus,
    /// Local planning authority name
    pub local_planning_authority: String,
    /// LPA application reference
    #[serde(default)]
    pub planning_application_reference: Option<String>,
    /// Procedure, once decided
    #[serde(default)]
    pub procedure_type: Option<ProcedureType>,
    /// Appellant
    #[serde(default)]
    pub appellant: Option<ServiceUser>,
    /// Appellant's agent
    #[serde(default)]
    pub agent: Option<ServiceUser>,
    /// Site address
    #[serde(default)]
    pub appeal_site: Option<Address>,
    /// Assigned case officer
    #[serde(default)]
    pub case_officer: Option<User>,
    /// Assigned inspector
    #[serde(default)]
    pub inspector: Option<User>,
    /// Case start date (ISO-8601)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Due dates, once started
    #[serde(default)]
    pub timetable: Option<Timetable>,
    /// Hearing arrangements
    #[serde(default)]
    pub hearing: Option<Event>,
    /// Inquiry arrangements
    #[serde(default)]
    pub inquiry: Option<Event>,
    /// Costs folders
    #[serde(default)]
    pub costs: Costs,
    /// Issued decision
    #[serde(default)]
    pub decision: Option<Decision>,
    /// Appellant's submission
    #[serde(default)]
    pub appellant_case: Option<AppellantCase>,
    /// LPA's questionnaire
    #[serde(default)]
    pub lpa_questionnaire: Option<LpaQuestionnaire>,
}

impl Appeal {
    /// Minimal aggregate
    #[must_use]
    pub fn new(
        appeal_id: u64,
        appeal_reference: impl Into<String>,
        appeal_type: AppealType,
        status: AppealStatus,
        local_planning_authority: impl Into<String>,
    ) -> Self {
        Self {
            appeal_id,
            appeal_reference: appeal_reference.into(),
            appeal_type,
            status,
            local_planning_authority: local_planning_authority.into(),
            planning_application_reference: None,
            procedure_type: None,
            appellant: None,
            agent: None,
            appeal_site: None,
            case_officer: None,
            inspector: None,
            start_date: None,
            timetable: None,
            hearing: None,
            inquiry: None,
            costs: Costs::default(),
            decision: None,
            appellant_case: None,
            lpa_questionnaire: None,
        }
    }

    /// Whether a decision has been issued
    #[inline]
    #[must_use]
    pub fn has_decision(&self) -> bool {
        self.decision.is_some()
    }

    /// Blank strings to `None`, empty sub-records dropped, dates checked
    ///
    /// # Errors
    /// [`AggregateError::BlankField`] for a blank required value,
    /// [`AggregateError::InvalidDate`] for a non-ISO date.
    pub fn normalise(mut self) -> Result<Self, AggregateError> {
        if self.appeal_reference.trim().is_empty() {
            return Err(AggregateError::BlankField("appealReference"));
        }
        if self.local_planning_authority.trim().is_empty() {
            return Err(AggregateError::BlankField("localPlanningAuthority"));
        }
        blank_to_none(&mut self.planning_application_reference);
        blank_to_none(&mut self.start_date);
        if let Some(timetable) = self.timetable.as_mut() {
            timetable.normalise();
        }
        if let Some(decision) = self.decision.as_mut() {
            blank_to_none(&mut decision.letter_date);
        }
        for user in [&mut self.case_officer, &mut self.inspector]
            .into_iter()
            .flatten()
        {
            user.normalise();
        }

        for user in [&mut self.appellant, &mut self.agent] {
            if let Some(u) = user.as_mut() {
                u.normalise();
            }
            if user.as_ref().is_some_and(|u| u.lines().is_empty()) {
                *user = None;
            }
        }

        if let Some(site) = self.appeal_site.as_mut() {
            site.normalise();
        }
        if self.appeal_site.as_ref().is_some_and(Address::is_empty) {
            self.appeal_site = None;
        }

        for event in [&mut self.hearing, &mut self.inquiry].into_iter().flatten() {
            if let Some(address) = event.address.as_mut() {
                address.normalise();
            }
            if event.address.as_ref().is_some_and(Address::is_empty) {
                event.address = None;
            }
        }

        if let Some(case) = self.appellant_case.as_mut() {
            blank_to_none(&mut case.site_access_details);
            blank_to_none(&mut case.health_and_safety_details);
            blank_to_none(&mut case.application_date);
            blank_to_none(&mut case.development_description);
        }
        if let Some(questionnaire) = self.lpa_questionnaire.as_mut() {
            blank_to_none(&mut questionnaire.site_access_details);
            blank_to_none(&mut questionnaire.neighbouring_site_access_details);
            blank_to_none(&mut questionnaire.health_and_safety_details);
            blank_to_none(&mut questionnaire.extra_conditions);
            questionnaire
                .listed_building_details
                .retain(|entry| !entry.trim().is_empty());
            questionnaire
                .notification_methods
                .retain(|entry| !entry.trim().is_empty());
        }

        self.check_dates()?;
        Ok(self)
    }

    fn check_dates(&self) -> Result<(), AggregateError> {
        let timetable = self.timetable.as_ref();
        let dates: [(&'static str, Option<&String>); 8] = [
            ("startDate", self.start_date.as_ref()),
            (
                "timetable.lpaQuestionnaireDueDate",
                timetable.and_then(|t| t.lpa_questionnaire_due_date.as_ref()),
            ),
            (
                "timetable.lpaStatementDueDate",
                timetable.and_then(|t| t.lpa_statement_due_date.as_ref()),
            ),
            (
                "timetable.finalCommentsDueDate",
                timetable.and_then(|t| t.final_comments_due_date.as_ref()),
            ),
            ("hearing.startTime", self.hearing.as_ref().map(|e| &e.start_time)),
            ("inquiry.startTime", self.inquiry.as_ref().map(|e| &e.start_time)),
            (
                "decision.letterDate",
                self.decision.as_ref().and_then(|d| d.letter_date.as_ref()),
            ),
            (
                "appellantCase.applicationDate",
                self.appellant_case
                    .as_ref()
                    .and_then(|c| c.application_date.as_ref()),
            ),
        ];
        for (field, value) in dates {
            if let Some(value) = value {
                parse_iso_date(value).map_err(|_| AggregateError::InvalidDate {
                    field,
                    value: value.clone(),
                })?;
            }
        }
        Ok(())
    }
}

/// Parse and normalise an aggregate from JSON
///
/// # Errors
/// [`AggregateError::Malformed`] when the JSON does not fit the aggregate,
/// otherwise as [`Appeal::normalise`].
pub fn load_appeal(json: &str) -> Result<Appeal, AggregateError> {
    let appeal: Appeal = serde_json::from_str(json)?;
    let appeal = appeal.normalise()?;
    tracing::debug!(
        appeal_id = appeal.appeal_id,
        appeal_type = ?appeal.appeal_type,
        status = ?appeal.status,
        "loaded appeal aggregate"
    );
    Ok(appeal)
}

fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    } else if let Some(v) = value.as_mut() {
        let trimmed = v.trim();
        if trimmed.len() != v.len() {
            *v = trimmed.to_string();
        }
    }
}
