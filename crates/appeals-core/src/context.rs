//! Submapper context and side-loaded representation data
//!
//! [`SubmapperContext`] is built once per mapping call and shared read-only
//! by every submapper. Anything a submapper needs beyond the aggregate is
//! resolved into it up front.

use crate::aggregate::{Appeal, AppellantCase, LpaQuestionnaire};
use crate::config::{FeatureFlags, MapperConfig};
use crate::error::CoreError;
use crate::session::{DynEvaluator, Permission, Session};
use appeals_components::format::parse_iso_date;
use appeals_components::ActionItem;
use appeals_mapping::{editable_when, map_action_component, MappingError};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Review state of a party's representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationStatus {
    /// Nothing submitted
    #[default]
    NotReceived,
    /// Submitted, not yet reviewed
    AwaitingReview,
    /// Accepted
    Valid,
    /// Rejected
    Invalid,
    /// Published to the case
    Published,
}

impl RepresentationStatus {
    /// Display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::NotReceived => "Not received",
            Self::AwaitingReview => "Ready to review",
            Self::Valid => "Accepted",
            Self::Invalid => "Rejected",
            Self::Published => "Shared",
        }
    }

    /// Whether something was submitted
    #[inline]
    #[must_use]
    pub fn is_received(self) -> bool {
        self != Self::NotReceived
    }

    /// Whether a review outcome exists
    #[inline]
    #[must_use]
    pub fn is_reviewed(self) -> bool {
        matches!(self, Self::Valid | Self::Invalid | Self::Published)
    }
}

/// Final comments state for both parties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinalCommentsSummary {
    /// Appellant's final comments
    pub appellant: RepresentationStatus,
    /// LPA's final comments
    pub lpa: RepresentationStatus,
}

/// Source of representation data the aggregate does not carry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepresentationSource: Send + Sync {
    /// Final comments state for an appeal
    async fn final_comments(&self, appeal_id: u64) -> Result<FinalCommentsSummary, CoreError>;
}

/// In-memory representation store
///
/// Appeals without an entry have received nothing.
#[derive(Debug, Default)]
pub struct InMemoryRepresentations {
    final_comments: DashMap<u64, FinalCommentsSummary>,
}

impl InMemoryRepresentations {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record final comments state for an appeal
    pub fn insert(&self, appeal_id: u64, summary: FinalCommentsSummary) {
        self.final_comments.insert(appeal_id, summary);
    }

    /// Number of appeals with an entry
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.final_comments.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.final_comments.is_empty()
    }
}

#[async_trait]
impl RepresentationSource for InMemoryRepresentations {
    async fn final_comments(&self, appeal_id: u64) -> Result<FinalCommentsSummary, CoreError> {
        Ok(self
            .final_comments
            .get(&appeal_id)
            .map(|entry| *entry.value())
            .unwrap_or_default())
    }
}

/// Everything a submapper may read
#[derive(Clone)]
pub struct SubmapperContext {
    /// Appeal aggregate
    pub appeal: Arc<Appeal>,
    /// Base path action links are built on
    pub current_route: String,
    /// Viewer's session
    pub session: Arc<Session>,
    /// Permission check
    pub evaluator: Arc<DynEvaluator>,
    /// Mapper configuration
    pub config: Arc<MapperConfig>,
    /// Request date; "has passed" checks compare against it
    pub today: NaiveDate,
    /// Side-loaded final comments state
    pub final_comments: Option<FinalCommentsSummary>,
}

impl fmt::Debug for SubmapperContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmapperContext")
            .field("appeal_id", &self.appeal.appeal_id)
            .field("current_route", &self.current_route)
            .field("permissions", &self.session.permissions)
            .field("today", &self.today)
            .field("final_comments", &self.final_comments)
            .finish_non_exhaustive()
    }
}

impl SubmapperContext {
    /// Whether the viewer holds `permission`
    #[inline]
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.editable(permission, true)
    }

    /// Permission held and domain gate open
    #[inline]
    #[must_use]
    pub fn editable(&self, permission: Permission, domain_gate: bool) -> bool {
        editable_when(
            self.evaluator.as_ref(),
            permission,
            self.session.as_ref(),
            domain_gate,
        )
    }

    /// `UpdateCase` held and the case still open
    #[inline]
    #[must_use]
    pub fn can_update_open_case(&self) -> bool {
        self.editable(Permission::UpdateCase, !self.appeal.status.is_closed())
    }

    /// The action, if the viewer holds `permission`
    #[must_use]
    pub fn gated_action(&self, permission: Permission, action: ActionItem) -> Option<ActionItem> {
        map_action_component(self.evaluator.as_ref(), permission, self.session.as_ref(), action)
    }

    /// Link below the current route
    #[must_use]
    pub fn route(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            self.current_route.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        )
    }

    /// Display date pattern
    #[inline]
    #[must_use]
    pub fn date_pattern(&self) -> &str {
        &self.config.date_format
    }

    /// Feature switches
    #[inline]
    #[must_use]
    pub fn flags(&self) -> FeatureFlags {
        self.config.feature_flags
    }

    /// Whether an ISO date lies before the request date
    ///
    /// Absent or unparseable dates have not passed.
    #[must_use]
    pub fn has_passed(&self, iso_date: Option<&str>) -> bool {
        iso_date
            .and_then(|iso| parse_iso_date(iso).ok())
            .is_some_and(|date| date < self.today)
    }

    /// Appellant case, required by `submapper`
    ///
    /// # Errors
    /// [`MappingError::MissingField`] when the aggregate has none.
    pub fn appellant_case(&self, submapper: &str) -> Result<&AppellantCase, MappingError> {
        self.appeal
            .appellant_case
            .as_ref()
            .ok_or_else(|| MappingError::missing_field(submapper, "appellantCase"))
    }

    /// LPA questionnaire, required by `submapper`
    ///
    /// # Errors
    /// [`MappingError::MissingField`] when the aggregate has none.
    pub fn lpa_questionnaire(&self, submapper: &str) -> Result<&LpaQuestionnaire, MappingError> {
        self.appeal
            .lpa_questionnaire
            .as_ref()
            .ok_or_else(|| MappingError::missing_field(submapper, "lpaQuestionnaire"))
    }

    /// Side-loaded final comments, required by `submapper`
    ///
    /// # Errors
    /// [`MappingError::MissingField`] when the resolver did not load them.
    pub fn final_comments(&self, submapper: &str) -> Result<FinalCommentsSummary, MappingError> {
        self.final_comments
            .ok_or_else(|| MappingError::missing_field(submapper, "finalComments"))
    }
}
