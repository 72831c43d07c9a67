//! Page mappers
//!
//! One [`AppealMapper`] per page. It owns that page's registries and the
//! collaborators its context resolver needs.

use crate::aggregate::Appeal;
use crate::config::MapperConfig;
use crate::context::{RepresentationSource, SubmapperContext};
use crate::error::CoreError;
use crate::session::{DynEvaluator, Session};
use crate::submappers::{
    appeal_details_registry, appellant_case_registry, lpa_questionnaire_registry, Registry,
    Variant,
};
use appeals_mapping::{initialise_and_map_data, MappedData, MapperDefinition, MappingError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Case page a mapper produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapperPage {
    /// Case overview
    AppealDetails,
    /// Appellant's submission
    AppellantCase,
    /// LPA's questionnaire
    LpaQuestionnaire,
}

impl MapperPage {
    /// Every page
    pub const ALL: [Self; 3] = [Self::AppealDetails, Self::AppellantCase, Self::LpaQuestionnaire];

    /// Key the page's instructions are returned under
    #[must_use]
    pub fn target_key(self) -> &'static str {
        match self {
            Self::AppealDetails => "appeal",
            Self::AppellantCase => "appellantCase",
            Self::LpaQuestionnaire => "lpaQuestionnaire",
        }
    }

    /// Kebab-case name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppealDetails => "appeal-details",
            Self::AppellantCase => "appellant-case",
            Self::LpaQuestionnaire => "lpa-questionnaire",
        }
    }

    fn registry(self, variant: Variant) -> Result<Registry, MappingError> {
        match self {
            Self::AppealDetails => appeal_details_registry(variant),
            Self::AppellantCase => appellant_case_registry(variant),
            Self::LpaQuestionnaire => lpa_questionnaire_registry(variant),
        }
    }
}

impl fmt::Display for MapperPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised page name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page '{0}'")]
pub struct UnknownPage(pub String);

impl FromStr for MapperPage {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Request-level inputs to one mapping
#[derive(Debug, Clone)]
pub struct AppealMapperRequest {
    /// Loaded aggregate
    pub appeal: Arc<Appeal>,
    /// Base path for action links
    pub current_route: String,
    /// Viewer's session
    pub session: Arc<Session>,
    /// Request date
    pub today: NaiveDate,
}

impl AppealMapperRequest {
    /// Create request
    #[inline]
    #[must_use]
    pub fn new(
        appeal: Arc<Appeal>,
        current_route: impl Into<String>,
        session: Arc<Session>,
        today: NaiveDate,
    ) -> Self {
        Self {
            appeal,
            current_route: current_route.into(),
            session,
            today,
        }
    }
}

/// Mapper for one case page
pub struct AppealMapper {
    page: MapperPage,
    expedited: Registry,
    full: Registry,
    config: Arc<MapperConfig>,
    evaluator: Arc<DynEvaluator>,
    representations: Arc<dyn RepresentationSource>,
}

impl fmt::Debug for AppealMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppealMapper")
            .field("page", &self.page)
            .field("expedited", &self.expedited)
            .field("full", &self.full)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppealMapper {
    /// Build the page's registries
    ///
    /// # Errors
    /// [`MappingError::DuplicateSubmapper`] if a registry repeats an id.
    pub fn new(
        page: MapperPage,
        config: Arc<MapperConfig>,
        evaluator: Arc<DynEvaluator>,
        representations: Arc<dyn RepresentationSource>,
    ) -> Result<Self, MappingError> {
        let mapper = Self {
            page,
            expedited: page.registry(Variant::Expedited)?,
            full: page.registry(Variant::Full)?,
            config,
            evaluator,
            representations,
        };
        tracing::debug!(
            page = %page,
            expedited = mapper.expedited.len(),
            full = mapper.full.len(),
            "page mapper ready"
        );
        Ok(mapper)
    }

    /// Page this mapper produces
    #[inline]
    #[must_use]
    pub fn page(&self) -> MapperPage {
        self.page
    }

    /// Map the page, optionally only the listed field ids
    ///
    /// # Errors
    /// [`CoreError::Mapping`] when context resolution or a submapper fails.
    pub async fn map(
        &self,
        request: &AppealMapperRequest,
        filter_keys: Option<&[&str]>,
    ) -> Result<MappedData, CoreError> {
        Ok(initialise_and_map_data(self, request, filter_keys).await?)
    }

    fn side_loads_final_comments(&self) -> bool {
        self.page == MapperPage::AppealDetails && self.config.feature_flags.final_comments
    }
}

#[async_trait]
impl MapperDefinition for AppealMapper {
    type Params = AppealMapperRequest;
    type Context = SubmapperContext;
    type Category = Variant;

    fn target_key(&self) -> &str {
        self.page.target_key()
    }

    fn category(&self, request: &AppealMapperRequest) -> Variant {
        Variant::of(request.appeal.appeal_type)
    }

    fn submappers(&self, category: Variant) -> &Registry {
        match category {
            Variant::Expedited => &self.expedited,
            Variant::Full => &self.full,
        }
    }

    async fn submapper_params(
        &self,
        request: &AppealMapperRequest,
    ) -> Result<SubmapperContext, MappingError> {
        let final_comments = if self.side_loads_final_comments() {
            let appeal_id = request.appeal.appeal_id;
            let summary = self
                .representations
                .final_comments(appeal_id)
                .await
                .map_err(|e| {
                    tracing::error!(appeal_id, error = %e, "final comments side-load failed");
                    MappingError::ContextResolution(e.to_string())
                })?;
            Some(summary)
        } else {
            None
        };

        Ok(SubmapperContext {
            appeal: Arc::clone(&request.appeal),
            current_route: request.current_route.clone(),
            session: Arc::clone(&request.session),
            evaluator: Arc::clone(&self.evaluator),
            config: Arc::clone(&self.config),
            today: request.today,
            final_comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AppealStatus, AppealType};
    use crate::context::{FinalCommentsSummary, MockRepresentationSource, RepresentationStatus};
    use crate::config::FeatureFlags;
    use crate::session::{Permission, SessionEvaluator};
    use pretty_assertions::assert_eq;

    fn request(appeal_type: AppealType) -> AppealMapperRequest {
        AppealMapperRequest::new(
            Arc::new(Appeal::new(5, "APP/5", appeal_type, AppealStatus::FinalComments, "LPA")),
            "/appeals/5",
            Arc::new(Session::default().with_permission(Permission::UpdateCase)),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn mapper(
        page: MapperPage,
        config: MapperConfig,
        source: MockRepresentationSource,
    ) -> AppealMapper {
        AppealMapper::new(
            page,
            Arc::new(config),
            Arc::new(SessionEvaluator::new()),
            Arc::new(source),
        )
        .unwrap()
    }

    #[test]
    fn pages_parse_from_names() {
        for page in MapperPage::ALL {
            assert_eq!(page.as_str().parse::<MapperPage>(), Ok(page));
        }
        assert!("timeline".parse::<MapperPage>().is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn details_page_side_loads_final_comments_once() {
        let mut source = MockRepresentationSource::new();
        source
            .expect_final_comments()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| {
                Ok(FinalCommentsSummary {
                    appellant: RepresentationStatus::Valid,
                    lpa: RepresentationStatus::NotReceived,
                })
            });
        let mapper = mapper(MapperPage::AppealDetails, MapperConfig::default(), source);

        let data = mapper.map(&request(AppealType::PlanningAppeal), None).await.unwrap();
        assert_eq!(data.target_key, "appeal");
        let appellant = data.instructions.get("appellant-final-comments").unwrap();
        assert_eq!(appellant.action_items()[0].text, "View");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn other_pages_skip_side_load() {
        let mut source = MockRepresentationSource::new();
        source.expect_final_comments().times(0);
        let mapper = mapper(MapperPage::LpaQuestionnaire, MapperConfig::default(), source);

        let err = mapper
            .map(&request(AppealType::Householder), Some(&["green-belt"]))
            .await
            .unwrap_err();
        assert!(err.is_input_defect());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn disabled_flag_skips_side_load() {
        let mut source = MockRepresentationSource::new();
        source.expect_final_comments().times(0);
        let config = MapperConfig::new().with_feature_flags(FeatureFlags {
            final_comments: false,
            ..FeatureFlags::default()
        });
        let mapper = mapper(MapperPage::AppealDetails, config, source);

        let data = mapper
            .map(&request(AppealType::Householder), Some(&["appellant-final-comments"]))
            .await
            .unwrap();
        assert!(data.instructions.get("appellant-final-comments").unwrap().display.is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn side_load_failure_is_context_resolution() {
        let mut source = MockRepresentationSource::new();
        source.expect_final_comments().returning(|id| {
            Err(CoreError::SideLoad {
                appeal_id: id,
                reason: "timeout".to_string(),
            })
        });
        let mapper = mapper(MapperPage::AppealDetails, MapperConfig::default(), source);

        let err = mapper.map(&request(AppealType::Householder), None).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Mapping(MappingError::ContextResolution(_))
        ));
        assert!(!err.is_input_defect());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn appeal_type_selects_registry() {
        let mut source = MockRepresentationSource::new();
        source
            .expect_final_comments()
            .returning(|_| Ok(FinalCommentsSummary::default()));
        let mapper = mapper(MapperPage::AppealDetails, MapperConfig::default(), source);

        let householder = mapper.map(&request(AppealType::Householder), None).await.unwrap();
        let planning = mapper.map(&request(AppealType::PlanningAppeal), None).await.unwrap();
        assert!(!householder.instructions.contains("lpa-final-comments"));
        assert!(planning.instructions.contains("lpa-final-comments"));
    }
}
