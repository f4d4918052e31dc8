//! Folio UI Components
//!
//! Leptos components for the interactive parts of a portfolio page.
//!
//! # Components
//!
//! - [`ActionList`] - Nested action list with dialog buttons
//! - [`Dialog`] - Modal dialog
//! - [`Carousel`] - Image carousel with wrap-around navigation
//! - [`Breadcrumbs`] - Breadcrumb navigation
//!
//! # Example
//!
//! ```ignore
//! use folio_core::ProjectMetadata;
//! use folio_ui::ActionList;
//! use leptos::prelude::*;
//!
//! #[component]
//! fn ProjectActions(metadata: ProjectMetadata) -> impl IntoView {
//!     view! { <ActionList items=metadata.actions /> }
//! }
//! ```

pub mod action_list;
pub mod dialog;
pub mod navigation;

pub use action_list::{ActionList, dialog_description};
pub use dialog::{Carousel, Dialog, carousel_step, paragraphs};
pub use navigation::{Breadcrumbs, Crumb};
