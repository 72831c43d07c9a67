//! Appeals Mapping Framework
//!
//! Composes permission-aware page view-models from per-field submappers.
//!
//! # Core Concepts
//!
//! - [`Submapper`]: Pure single-field function of a shared context
//! - [`SubmapperRegistry`]: Ordered, id-unique registry of submappers
//! - [`MapperDefinition`]: Registry selection plus context resolution for one page
//! - [`initialise_and_map_data`]: Runs a mapper, optionally for a subset of ids
//! - [`PermissionEvaluator`] / [`map_action_component`]: Action gating
//!
//! # Example
//!
//! ```rust,ignore
//! use appeals_mapping::initialise_and_map_data;
//!
//! let data = initialise_and_map_data(&mapper, &request, Some(&["appellant"])).await?;
//! let appellant = data.instructions.get("appellant");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod factory;
mod permission;
mod registry;

// Re-exports
pub use error::MappingError;
pub use factory::{initialise_and_map_data, MappedData, MappedInstructions, MapperDefinition};
pub use permission::{
    editable_when, gated_actions, map_action_component, HasCapabilities, PermissionEvaluator,
    SessionCapabilities,
};
pub use registry::{Submapper, SubmapperRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
