//! Terminal UI components for git-hooks
//!
//! - Selection markers for listing and prompts
//! - Colored status icons

pub mod icons;

pub use icons::{Marker, StatusIcon};
