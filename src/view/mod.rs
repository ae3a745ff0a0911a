//! Top-level view resolution.
//!
//! `resolve` is a pure function of the location and the store, re-run after
//! every router transition.

mod image;

pub use image::{
    LoadState, Picture, Placeholder, PostImages, ProjectImages, post_card, project_card,
};

use serde::Serialize;

use crate::asset::{AssetManifest, ImageVariant};
use crate::content::{ContentStore, Post, Project};
use crate::core::{DetailKind, HomeSection, Location, Route};
use crate::router::Viewport;

/// The view a location renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "record", rename_all = "snake_case")]
pub enum View<'a> {
    Home,
    ProjectDetail(&'a Project),
    PostDetail(&'a Post),
}

/// Pick the view for `location`.
///
/// Detail paths whose slug matches no record fall through to `Home`.
pub fn resolve<'a>(location: &Location, store: &'a ContentStore) -> View<'a> {
    match location.route() {
        Route::Home => View::Home,
        Route::Detail(DetailKind::Project, slug) => {
            store.project(slug).map_or(View::Home, View::ProjectDetail)
        }
        Route::Detail(DetailKind::Post, slug) => {
            store.post(slug).map_or(View::Home, View::PostDetail)
        }
    }
}

impl<'a> View<'a> {
    #[inline]
    pub fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Images the view shows, resolved against the manifest.
    pub fn images(&self, store: &'a ContentStore, manifest: &'a AssetManifest) -> ViewImages<'a> {
        match *self {
            Self::Home => ViewImages::Home {
                projects: store
                    .projects()
                    .iter()
                    .map(|p| Card::project(p, manifest))
                    .collect(),
                posts: store
                    .posts()
                    .iter()
                    .map(|p| Card::post(p, manifest))
                    .collect(),
            },
            Self::ProjectDetail(project) => ViewImages::Project(ProjectImages::resolve(
                project,
                manifest.index(DetailKind::Project),
            )),
            Self::PostDetail(post) => {
                ViewImages::Post(PostImages::resolve(post, manifest.index(DetailKind::Post)))
            }
        }
    }
}

/// A card in one of the home listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card<'a> {
    pub title: &'a str,
    /// Detail page link; records without a slug are not linked.
    pub href: Option<String>,
    pub picture: Picture<'a>,
}

impl<'a> Card<'a> {
    fn project(project: &'a Project, manifest: &'a AssetManifest) -> Self {
        Self {
            title: &project.title,
            href: detail_href(DetailKind::Project, &project.slug),
            picture: project_card(project, manifest.index(DetailKind::Project)),
        }
    }

    fn post(post: &'a Post, manifest: &'a AssetManifest) -> Self {
        Self {
            title: &post.title,
            href: detail_href(DetailKind::Post, &post.slug),
            picture: post_card(post, manifest.index(DetailKind::Post)),
        }
    }
}

fn detail_href(kind: DetailKind, slug: &str) -> Option<String> {
    (!slug.is_empty()).then(|| kind.href(slug))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewImages<'a> {
    Home {
        projects: Vec<Card<'a>>,
        posts: Vec<Card<'a>>,
    },
    Project(ProjectImages<'a>),
    Post(PostImages<'a>),
}

impl<'a> ViewImages<'a> {
    /// `<img src>` of every real image on the page, in page order.
    pub fn urls(&self) -> Vec<&'a str> {
        let images: Vec<&'a ImageVariant> = match self {
            Self::Home { projects, posts } => projects
                .iter()
                .chain(posts)
                .filter_map(|card| card.picture.image())
                .collect(),
            Self::Project(p) => [&p.before, &p.after]
                .into_iter()
                .filter_map(Picture::image)
                .chain(p.gallery.iter().copied())
                .collect(),
            Self::Post(p) => p.hero.into_iter().chain(p.gallery.iter().copied()).collect(),
        };
        images.into_iter().map(|image| image.fallback.as_str()).collect()
    }
}

/// Element ids present on the page rendered for a view.
///
/// Only the home view has anchor targets; detail pages have none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    ids: Vec<&'static str>,
    scrolled: Vec<String>,
}

impl RenderedPage {
    pub fn of(view: &View<'_>) -> Self {
        let ids = match view {
            View::Home => HomeSection::ALL.iter().map(|s| s.id()).collect(),
            View::ProjectDetail(_) | View::PostDetail(_) => Vec::new(),
        };
        Self {
            ids,
            scrolled: Vec::new(),
        }
    }

    pub fn ids(&self) -> &[&'static str] {
        &self.ids
    }

    /// Ids scrolled into view, oldest first.
    pub fn scrolled(&self) -> &[String] {
        &self.scrolled
    }
}

impl Viewport for RenderedPage {
    fn scroll_into_view(&mut self, id: &str) -> bool {
        let found = self.ids.iter().any(|known| *known == id);
        if found {
            self.scrolled.push(id.to_string());
        }
        found
    }
}
