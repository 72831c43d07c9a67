//! Appeals Page Components
//!
//! Typed descriptions of the GOV.UK components a case page is assembled from,
//! and the primitive builders that produce them.
//!
//! # Core Concepts
//!
//! - [`PageComponent`]: Type-tagged render instruction (`summary-list`, `table`, ...)
//! - [`FieldInstruction`]: Field id plus a [`DisplayPayload`] with at most one shape
//! - [`ActionItem`] / [`ActionVerb`]: Edit affordances and their wording convention
//! - [`RowOptions`]: Presentation options shared by the summary-list builders
//! - [`DocumentFolder`]: Folder descriptor used for upload/manage rows
//!
//! # Example
//!
//! ```rust,ignore
//! use appeals_components::{boolean_summary_list_item, RowOptions};
//!
//! let instruction = boolean_summary_list_item(
//!     RowOptions::new("green-belt", "Green belt").link("/green-belt").editable(true),
//!     Some(true),
//!     None,
//! );
//! assert_eq!(instruction.id, "green-belt");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod action;
mod builders;
mod component;
mod display;
mod folder;

pub mod format;

// Re-exports
pub use action::{ActionItem, ActionVerb};
pub use builders::{
    boolean_summary_list_item, boolean_with_details_summary_list_item, button_instruction,
    costs_folder_table_item, date_summary_list_item, document_folder_summary_list_item,
    folder_link, list_summary_list_item, optional_text_summary_list_item,
    page_components_instruction, text_summary_list_item, value_summary_list_item,
    BooleanWithDetails, FolderRowOptions,
    RowOptions,
};
pub use component::{
    Actions, ButtonItem, ChoiceItem, ChoiceParameters, ComponentKind, Content, DetailsParameters,
    HtmlParameters, InputParameters, PageComponent, ShowMoreParameters, SummaryListItem,
    SummaryListParameters, SummaryValue, TableCell, TableItem, TableParameters,
    TextareaParameters, WrapperHtml,
};
pub use display::{DisplayPayload, FieldInstruction};
pub use folder::{
    Document, DocumentFolder, DocumentVersion, FolderStatus, RedactionStatus, VirusCheckStatus,
};
pub use format::{DateFormatError, Reason};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
