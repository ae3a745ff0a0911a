//! Site content: projects, posts, testimonials and services.

mod record;
mod store;

pub use record::{Block, Post, Project, Service, Testimonial};
pub use store::{ContentError, ContentStore, DuplicateSlug};
