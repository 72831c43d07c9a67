//! Appeals Core
//!
//! Case-page view-models for planning appeals: the typed appeal aggregate,
//! session permissions, and the submappers for each case page.
//!
//! # Core Concepts
//!
//! - [`Appeal`]: Typed, normalised case aggregate ([`load_appeal`])
//! - [`SubmapperContext`]: Read-only snapshot every submapper of a request sees
//! - [`Permission`] / [`Session`]: Capabilities checked through an injected evaluator
//! - [`AppealMapper`]: One case page; registries selected by appeal type
//! - [`RepresentationSource`]: Side-loaded representation state
//!
//! # Example
//!
//! ```rust,ignore
//! use appeals_core::{load_appeal, AppealMapper, AppealMapperRequest, MapperPage};
//!
//! let appeal = Arc::new(load_appeal(&json)?);
//! let mapper = AppealMapper::new(MapperPage::AppealDetails, config, evaluator, source)?;
//! let request = AppealMapperRequest::new(appeal, "/appeals/1", session, today);
//! let data = mapper.map(&request, None).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregate;
mod config;
mod context;
mod error;
mod mapper;
mod session;
mod submappers;

// Re-exports
pub use aggregate::{
    load_appeal, Address, Appeal, AppealStatus, AppealType, AppellantCase, ApplicationDecision,
    Costs, Decision, DecisionOutcome, Event, LpaQuestionnaire, ProcedureType, ServiceUser,
    Timetable, User, ValidationOutcome, ValidationOutcomeKind,
};
pub use config::{FeatureFlags, MapperConfig};
pub use context::{
    FinalCommentsSummary, InMemoryRepresentations, RepresentationSource, RepresentationStatus,
    SubmapperContext,
};
pub use error::{AggregateError, ConfigError, CoreError};
pub use mapper::{AppealMapper, AppealMapperRequest, MapperPage, UnknownPage};
pub use session::{Account, DynEvaluator, Permission, Session, SessionEvaluator, UnknownPermission};
pub use submappers::{Registry, Variant};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
