//! Content records as they appear in the JSON data files.
//!
//! Data is hand-edited, so every field except the title-like ones is optional
//! and a field of the wrong type reads as absent instead of rejecting the file.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Deserialize `T`, or `T::default()` when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A finished interior project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient")]
    pub slug: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub tag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    /// Extra variant names shown below the before/after pair.
    #[serde(deserialize_with = "lenient")]
    pub gallery: Vec<String>,
}

impl Project {
    /// Variant used on the home card.
    pub const CARD_VARIANT: &'static str = "portada";
    /// Variant shown as "before" on the detail page.
    pub const BEFORE_VARIANT: &'static str = "antes";
    /// "After" image candidates, first available wins.
    pub const AFTER_VARIANTS: [&'static str; 2] = ["despues", "portada"];
}

/// A blog-style post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "lenient")]
    pub slug: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub tag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,
    /// Variant name of the cover image.
    #[serde(deserialize_with = "lenient")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub gallery: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub blocks: Vec<Block>,
}

impl Post {
    pub const DEFAULT_COVER: &'static str = "cover";

    /// Cover variant: the declared one, else `cover`.
    pub fn cover_variant(&self) -> &str {
        self.cover
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(Self::DEFAULT_COVER)
    }
}

/// One section of a post body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub items: Option<Vec<String>>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.items.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub text: String,
}

/// Service offering, stored as a `[title, description]` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service(pub String, pub String);

impl Service {
    pub fn title(&self) -> &str {
        &self.0
    }

    pub fn description(&self) -> &str {
        &self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_minimal() {
        let p: Project = serde_json::from_str(r#"{"slug":"cocina","title":"Cocina"}"#).unwrap();
        assert_eq!(p.slug, "cocina");
        assert_eq!(p.tag, None);
        assert!(p.description.is_empty());
        assert!(p.gallery.is_empty());
    }

    #[test]
    fn test_wrong_types_read_as_absent() {
        let p: Post = serde_json::from_str(
            r#"{"slug":"luz","title":"Luz","gallery":"uno","cover":3,"blocks":{"x":1},"extra":true}"#,
        )
        .unwrap();
        assert!(p.gallery.is_empty());
        assert_eq!(p.cover, None);
        assert!(p.blocks.is_empty());
    }

    #[test]
    fn test_cover_variant_fallback() {
        let mut p = Post::default();
        assert_eq!(p.cover_variant(), "cover");
        p.cover = Some(String::new());
        assert_eq!(p.cover_variant(), "cover");
        p.cover = Some("portada".into());
        assert_eq!(p.cover_variant(), "portada");
    }

    #[test]
    fn test_block_fields() {
        let b: Block =
            serde_json::from_str(r#"{"title":"Paleta","items":["roble","lino"]}"#).unwrap();
        assert_eq!(b.title.as_deref(), Some("Paleta"));
        assert_eq!(b.items.as_deref(), Some(&["roble".to_string(), "lino".to_string()][..]));
        assert!(!b.is_empty());
        assert!(Block::default().is_empty());
    }

    #[test]
    fn test_service_pair() {
        let s: Service = serde_json::from_str(r#"["Asesoría","Online o presencial"]"#).unwrap();
        assert_eq!(s.title(), "Asesoría");
        assert_eq!(s.description(), "Online o presencial");
    }
}
