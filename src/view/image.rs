//! Which image each view shows, and what stands in when it is missing.
//!
//! Fallback chains live here, once per record type:
//!
//! | Where          | Variant                          | Missing        |
//! |----------------|----------------------------------|----------------|
//! | project card   | `portada`                        | placeholder    |
//! | project before | `antes`                          | placeholder    |
//! | project after  | `despues`, else `portada`        | placeholder    |
//! | post card      | `cover` field, else `cover`      | placeholder    |
//! | post hero      | same as the card                 | omitted        |
//! | galleries      | listed names                     | skipped        |

use serde::Serialize;

use crate::asset::{AssetIndex, ImageVariant};
use crate::content::{Post, Project};

/// Gradient start of the placeholder (sage).
pub const PLACEHOLDER_FROM: &str = "#959c89";
/// Gradient end of the placeholder (dark sage).
pub const PLACEHOLDER_TO: &str = "#86907E";
pub const PLACEHOLDER_CAPTION: &str = "4:3 / hi-res";

/// Deterministic stand-in for a missing image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub label: String,
    /// 135° linear gradient stops.
    pub gradient: [&'static str; 2],
    pub caption: &'static str,
}

impl Placeholder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            gradient: [PLACEHOLDER_FROM, PLACEHOLDER_TO],
            caption: PLACEHOLDER_CAPTION,
        }
    }
}

/// An image slot: the real picture or its placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Picture<'a> {
    Image(&'a ImageVariant),
    Placeholder(Placeholder),
}

impl<'a> Picture<'a> {
    /// `image`, or a placeholder labeled `label`.
    pub fn or_placeholder(image: Option<&'a ImageVariant>, label: &str) -> Self {
        match image {
            Some(image) => Self::Image(image),
            None => Self::Placeholder(Placeholder::new(label)),
        }
    }

    pub fn image(&self) -> Option<&'a ImageVariant> {
        match self {
            Self::Image(image) => Some(image),
            Self::Placeholder(_) => None,
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Loading state of a rendered `<img>`.
///
/// Errors settle too, so a broken image never keeps the skeleton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Pending,
    Settled,
}

impl LoadState {
    pub fn on_load(&mut self) {
        *self = Self::Settled;
    }

    pub fn on_error(&mut self) {
        *self = Self::Settled;
    }

    /// Whether the loading skeleton is shown.
    #[inline]
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

// ============================================================================
// Projects
// ============================================================================

pub fn project_card<'a>(project: &Project, index: &'a AssetIndex) -> Picture<'a> {
    Picture::or_placeholder(
        index.lookup(&project.slug, Project::CARD_VARIANT),
        &project.title,
    )
}

/// Images of the project detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectImages<'a> {
    pub before: Picture<'a>,
    pub after: Picture<'a>,
    pub gallery: Vec<&'a ImageVariant>,
}

impl<'a> ProjectImages<'a> {
    pub fn resolve(project: &Project, index: &'a AssetIndex) -> Self {
        let slug = project.slug.as_str();
        let after = Project::AFTER_VARIANTS
            .iter()
            .find_map(|variant| index.lookup(slug, variant));

        Self {
            before: Picture::or_placeholder(index.lookup(slug, Project::BEFORE_VARIANT), "Antes"),
            after: Picture::or_placeholder(after, "Después"),
            gallery: gallery(slug, &project.gallery, index),
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

pub fn post_card<'a>(post: &Post, index: &'a AssetIndex) -> Picture<'a> {
    Picture::or_placeholder(index.lookup(&post.slug, post.cover_variant()), &post.title)
}

/// Images of the post detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostImages<'a> {
    /// Omitted from the page when missing.
    pub hero: Option<&'a ImageVariant>,
    pub gallery: Vec<&'a ImageVariant>,
}

impl<'a> PostImages<'a> {
    pub fn resolve(post: &Post, index: &'a AssetIndex) -> Self {
        Self {
            hero: index.lookup(&post.slug, post.cover_variant()),
            gallery: gallery(&post.slug, &post.gallery, index),
        }
    }
}

/// Listed variants that exist, in listed order.
fn gallery<'a>(slug: &str, names: &[String], index: &'a AssetIndex) -> Vec<&'a ImageVariant> {
    names
        .iter()
        .filter_map(|name| index.lookup(slug, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{ImageFormat, ImageSource};

    fn index(entries: &[(&str, &str)]) -> AssetIndex {
        let mut index = AssetIndex::new();
        for (slug, variant) in entries {
            let url = format!("/assets/{slug}/{variant}.jpg");
            index.insert(ImageVariant::new(
                *slug,
                *variant,
                ImageSource::new(ImageFormat::Jpeg, url, None),
            ));
        }
        index
    }

    fn project(slug: &str) -> Project {
        Project {
            slug: slug.into(),
            title: "Cocina Blanco Norte".into(),
            ..Project::default()
        }
    }

    #[test]
    fn test_unknown_slug_card_is_placeholder() {
        let index = index(&[("cocina-blanco-norte", "portada")]);
        assert!(index.lookup("unknown-slug", "portada").is_none());

        let card = project_card(&project("unknown-slug"), &index);
        assert_eq!(
            card,
            Picture::Placeholder(Placeholder {
                label: "Cocina Blanco Norte".into(),
                gradient: ["#959c89", "#86907E"],
                caption: "4:3 / hi-res",
            })
        );
    }

    #[test]
    fn test_project_card_found_through_any_slug_form() {
        let index = index(&[("bano-gris", "portada")]);
        let card = project_card(&project("Baño-Gris"), &index);
        assert_eq!(card.image().map(|i| i.fallback.as_str()), Some("/assets/bano-gris/portada.jpg"));
    }

    #[test]
    fn test_after_falls_back_to_portada() {
        let index = index(&[("cocina", "antes"), ("cocina", "portada")]);
        let images = ProjectImages::resolve(&project("cocina"), &index);
        assert_eq!(images.before.image().unwrap().variant, "antes");
        assert_eq!(images.after.image().unwrap().variant, "portada");

        let index = self::index(&[("cocina", "despues"), ("cocina", "portada")]);
        let images = ProjectImages::resolve(&project("cocina"), &index);
        assert!(images.before.is_placeholder());
        assert_eq!(images.after.image().unwrap().variant, "despues");
    }

    #[test]
    fn test_detail_placeholders_are_labeled() {
        let empty = AssetIndex::new();
        let images = ProjectImages::resolve(&project("vacio"), &empty);
        let labels: Vec<_> = [&images.before, &images.after]
            .into_iter()
            .map(|p| match p {
                Picture::Placeholder(p) => p.label.as_str(),
                Picture::Image(_) => "",
            })
            .collect();
        assert_eq!(labels, ["Antes", "Después"]);
    }

    #[test]
    fn test_post_images() {
        let index = index(&[("luz", "cover"), ("luz", "g1"), ("luz", "g3")]);
        let mut post = Post {
            slug: "luz".into(),
            title: "Luz".into(),
            gallery: vec!["g1".into(), "g2".into(), "g3".into()],
            ..Post::default()
        };

        let images = PostImages::resolve(&post, &index);
        assert_eq!(images.hero.unwrap().variant, "cover");
        let names: Vec<_> = images.gallery.iter().map(|g| g.variant.as_str()).collect();
        assert_eq!(names, ["g1", "g3"]);

        post.cover = Some("portada".into());
        assert!(PostImages::resolve(&post, &index).hero.is_none());
        assert!(post_card(&post, &index).is_placeholder());
    }

    #[test]
    fn test_load_state_settles_on_error() {
        let mut state = LoadState::default();
        assert!(state.is_pending());
        state.on_error();
        assert!(!state.is_pending());

        let mut state = LoadState::default();
        state.on_load();
        assert_eq!(state, LoadState::Settled);
    }
}
