//! Core types - pure abstractions shared across the codebase.

mod section;
pub mod slug;
mod url;

pub use section::HomeSection;
pub use url::{DetailKind, Href, Location, Route};
