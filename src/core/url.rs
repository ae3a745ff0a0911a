//! Location and route types.
//!
//! - `Location` mirrors what the browser reports: an encoded path plus the
//!   fragment (without `#`)
//! - `Route` is the structured reading of a path
//!
//! Hrefs are resolved against the site origin the same way `new URL(href, origin)`
//! does, so `#contacto`, `/#contacto` and `https://<origin>/#contacto` all land
//! on the same location.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use url::Url;

use super::slug::{canonical_segment, decode_or_raw};

/// Base every internal href is resolved against.
static ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("static origin is a valid URL"));

// ============================================================================
// Location
// ============================================================================

/// Current position in the site: absolute path plus in-page anchor.
///
/// Invariants:
/// - `path` starts with `/` and is percent-encoded like `location.pathname`
/// - `anchor` carries no leading `#`; empty means no anchor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    path: String,
    anchor: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::home()
    }
}

impl Location {
    /// `/` with no anchor.
    pub fn home() -> Self {
        Self {
            path: "/".to_string(),
            anchor: String::new(),
        }
    }

    /// Build from parts, adding the leading slash and dropping a leading `#`.
    pub fn new(path: &str, anchor: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            path,
            anchor: anchor.trim_start_matches('#').to_string(),
        }
    }

    /// Parse an href relative to the site origin. Query strings are dropped.
    pub fn parse(href: &str) -> Self {
        match resolve(href) {
            Some(url) => Self::from_url(&url),
            None => Self::parse_fallback(href),
        }
    }

    fn from_url(url: &Url) -> Self {
        Self::new(url.path(), url.fragment().unwrap_or_default())
    }

    /// Split by hand when the url crate rejects the input.
    fn parse_fallback(href: &str) -> Self {
        let (rest, anchor) = href.split_once('#').unwrap_or((href, ""));
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() {
            return Self::new("/", anchor);
        }
        Self::new(path, anchor)
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    #[inline]
    pub fn has_anchor(&self) -> bool {
        !self.anchor.is_empty()
    }

    /// Check if the path is the home path `/`.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.path == "/"
    }

    pub fn route(&self) -> Route<'_> {
        Route::from_path(&self.path)
    }

    /// Same path, different anchor.
    pub fn with_anchor(&self, anchor: &str) -> Self {
        Self::new(&self.path, anchor)
    }

    /// Href suitable for `history.pushState` (`/path#anchor`).
    pub fn href(&self) -> String {
        if self.anchor.is_empty() {
            self.path.clone()
        } else {
            format!("{}#{}", self.path, self.anchor)
        }
    }

    /// Canonical detail location for a legacy `#proyecto/<slug>` or
    /// `#post/<slug>` anchor.
    pub fn legacy_redirect(&self) -> Option<Self> {
        let (kind, slug) = DetailKind::ALL.iter().find_map(|kind| {
            let slug = self.anchor.strip_prefix(kind.prefix())?;
            (!slug.is_empty()).then_some((*kind, slug))
        })?;
        Some(Self::parse(&kind.href(&decode_or_raw(slug))))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

// ============================================================================
// Href classification
// ============================================================================

/// How an activated link should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// Same-origin link; stays in the app.
    Internal(Location),
    /// Another origin or a non-http scheme (`mailto:`, `tel:`, `https://wa.me/...`).
    External(String),
}

impl Href {
    pub fn classify(href: &str) -> Self {
        match resolve(href) {
            Some(url) if url.origin() == ORIGIN.origin() => Self::Internal(Location::from_url(&url)),
            Some(_) => Self::External(href.to_string()),
            // Unparseable, but it names another origin
            None if names_origin(href.trim()) => Self::External(href.to_string()),
            None => Self::Internal(Location::parse_fallback(href)),
        }
    }
}

/// `scheme:` or `//host` prefix.
fn names_origin(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn resolve(href: &str) -> Option<Url> {
    ORIGIN.join(href.trim()).ok()
}

// ============================================================================
// Route
// ============================================================================

/// Kind of detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Project,
    Post,
}

impl DetailKind {
    pub const ALL: [Self; 2] = [Self::Project, Self::Post];

    /// Path segment naming the kind (without slashes).
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Project => "proyecto",
            Self::Post => "post",
        }
    }

    /// `proyecto/` or `post/`, the shape shared by paths and legacy anchors.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Project => "proyecto/",
            Self::Post => "post/",
        }
    }

    /// Canonical href for a stored or decoded slug.
    pub fn href(self, slug: &str) -> String {
        format!("/{}/{}", self.segment(), canonical_segment(slug))
    }
}

/// Structured reading of a location path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    /// `/proyecto/<slug>` or `/post/<slug>`; `slug` is still encoded.
    Detail(DetailKind, &'a str),
}

impl<'a> Route<'a> {
    /// Paths other than the two detail shapes read as `Home`.
    pub fn from_path(path: &'a str) -> Self {
        let Some(rest) = path.strip_prefix('/') else {
            return Self::Home;
        };
        DetailKind::ALL
            .iter()
            .find_map(|kind| {
                let slug = rest.strip_prefix(kind.prefix())?;
                (!slug.is_empty()).then_some(Self::Detail(*kind, slug))
            })
            .unwrap_or(Self::Home)
    }

    #[inline]
    pub fn is_detail(&self) -> bool {
        matches!(self, Self::Detail(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_and_anchor() {
        let loc = Location::parse("/proyecto/cocina-blanco-norte");
        assert_eq!(loc.path(), "/proyecto/cocina-blanco-norte");
        assert_eq!(loc.anchor(), "");

        let loc = Location::parse("/#contacto");
        assert!(loc.is_home());
        assert_eq!(loc.anchor(), "contacto");
    }

    #[test]
    fn test_fragment_only_resolves_to_home() {
        let loc = Location::parse("#publicaciones");
        assert_eq!(loc.path(), "/");
        assert_eq!(loc.anchor(), "publicaciones");
    }

    #[test]
    fn test_query_is_dropped() {
        let loc = Location::parse("/post/luz-natural?utm=ig#galeria");
        assert_eq!(loc.path(), "/post/luz-natural");
        assert_eq!(loc.anchor(), "galeria");
        assert_eq!(loc.href(), "/post/luz-natural#galeria");
    }

    #[test]
    fn test_non_ascii_path_is_encoded() {
        let loc = Location::parse("/proyecto/baño");
        assert_eq!(loc.path(), "/proyecto/ba%C3%B1o");
    }

    #[test]
    fn test_absolute_same_origin() {
        let loc = Location::parse("http://localhost/post/x#y");
        assert_eq!(loc.href(), "/post/x#y");
    }

    #[test]
    fn test_new_normalizes() {
        let loc = Location::new("proyecto/a", "#b");
        assert_eq!(loc.path(), "/proyecto/a");
        assert_eq!(loc.anchor(), "b");
        assert_eq!(loc.to_string(), "/proyecto/a#b");
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(
            Route::from_path("/proyecto/cocina"),
            Route::Detail(DetailKind::Project, "cocina")
        );
        assert_eq!(
            Route::from_path("/post/a/b"),
            Route::Detail(DetailKind::Post, "a/b")
        );
        // Empty slug or unknown prefix is home
        assert_eq!(Route::from_path("/proyecto/"), Route::Home);
        assert_eq!(Route::from_path("/proyectos/x"), Route::Home);
        assert_eq!(Route::from_path("/sobre"), Route::Home);
    }

    #[test]
    fn test_legacy_redirect() {
        let loc = Location::parse("#proyecto/bano-terrazo-gris");
        let target = loc.legacy_redirect().unwrap();
        assert_eq!(target.path(), "/proyecto/bano-terrazo-gris");
        assert_eq!(target.anchor(), "");

        let loc = Location::parse("#post/ba%C3%B1o-gris");
        let target = loc.legacy_redirect().unwrap();
        assert_eq!(target.path(), "/post/ba%C3%B1o-gris");

        assert!(Location::parse("#contacto").legacy_redirect().is_none());
        assert!(Location::parse("#proyecto/").legacy_redirect().is_none());
    }

    #[test]
    fn test_detail_href() {
        assert_eq!(DetailKind::Project.href("baño"), "/proyecto/ba%C3%B1o");
        assert_eq!(DetailKind::Post.href("ba%C3%B1o"), "/post/ba%C3%B1o");
    }

    #[test]
    fn test_classify_href() {
        assert!(matches!(Href::classify("/post/x"), Href::Internal(_)));
        assert!(matches!(Href::classify("#contacto"), Href::Internal(_)));
        assert!(matches!(
            Href::classify("https://wa.me/5492914441533"),
            Href::External(_)
        ));
        assert!(matches!(
            Href::classify("mailto:hola@example.com"),
            Href::External(_)
        ));
    }

    #[test]
    fn test_classify_unparseable_href() {
        for href in ["http://[bad", "https://exa mple.com", "//[bad"] {
            assert_eq!(Href::classify(href), Href::External(href.into()), "{href}");
        }
        assert!(!names_origin("/proyecto/a:b"));
        assert!(!names_origin("1a:b"));
    }
}
