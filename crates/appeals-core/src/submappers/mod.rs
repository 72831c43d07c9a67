//! Per-field submappers and the registries they are collected into
//!
//! Every page has two registries: one for the expedited appeal types and one
//! for the full ones. [`Variant::of`] decides which applies.

mod appeal_details;
mod appellant_case;
mod costs;
mod events;
mod lpa_questionnaire;
mod shared;
mod timetable;

use crate::aggregate::AppealType;
use crate::context::SubmapperContext;
use appeals_components::FieldInstruction;
use appeals_mapping::{MappingError, SubmapperRegistry};

pub(crate) use appeal_details::registry as appeal_details_registry;
pub(crate) use appellant_case::registry as appellant_case_registry;
pub(crate) use lpa_questionnaire::registry as lpa_questionnaire_registry;

/// Registry of submappers over the shared context
pub type Registry = SubmapperRegistry<SubmapperContext>;

type MapResult = Result<FieldInstruction, MappingError>;

/// Submapper set an appeal type uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Householder-style: no statements, no LPA final comments
    Expedited,
    /// Full planning procedure
    Full,
}

impl Variant {
    /// Variant for an appeal type
    #[must_use]
    pub fn of(appeal_type: AppealType) -> Self {
        match appeal_type {
            AppealType::Householder | AppealType::AdvertisementCas => Self::Expedited,
            AppealType::PlanningAppeal | AppealType::PlanningListedBuilding => Self::Full,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::aggregate::{Appeal, AppealStatus, AppealType, AppellantCase, LpaQuestionnaire};
    use crate::config::MapperConfig;
    use crate::context::SubmapperContext;
    use crate::session::{Permission, Session, SessionEvaluator};
    use chrono::NaiveDate;
    use std::sync::Arc;

    pub(crate) fn appeal(appeal_type: AppealType, status: AppealStatus) -> Appeal {
        let mut appeal = Appeal::new(42, "APP/Q9999/D/24/1", appeal_type, status, "Wiltshire Council");
        appeal.appellant_case = Some(AppellantCase::default());
        appeal.lpa_questionnaire = Some(LpaQuestionnaire::default());
        appeal
    }

    pub(crate) fn context(appeal: Appeal, permissions: &[Permission]) -> SubmapperContext {
        SubmapperContext {
            appeal: Arc::new(appeal),
            current_route: "/appeals-service/appeal-details/42".to_string(),
            session: Arc::new(Session::default().with_permissions(permissions.iter().copied())),
            evaluator: Arc::new(SessionEvaluator::new()),
            config: Arc::new(MapperConfig::default()),
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
            final_comments: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_partition_appeal_types() {
        assert_eq!(Variant::of(AppealType::Householder), Variant::Expedited);
        assert_eq!(Variant::of(AppealType::AdvertisementCas), Variant::Expedited);
        assert_eq!(Variant::of(AppealType::PlanningAppeal), Variant::Full);
        assert_eq!(Variant::of(AppealType::PlanningListedBuilding), Variant::Full);
    }

    #[test]
    fn registries_build_without_duplicates() {
        for variant in [Variant::Expedited, Variant::Full] {
            assert!(appeal_details_registry(variant).is_ok());
            assert!(appellant_case_registry(variant).is_ok());
            assert!(lpa_questionnaire_registry(variant).is_ok());
        }
    }

    #[test]
    fn full_variant_adds_fields() {
        let expedited = appeal_details_registry(Variant::Expedited).unwrap();
        let full = appeal_details_registry(Variant::Full).unwrap();
        assert!(!expedited.contains("lpa-statement-due-date"));
        assert!(full.contains("lpa-statement-due-date"));
        assert!(full.len() > expedited.len());
    }
}
