//! Sections of the home view that anchors can point at.

use serde::Serialize;

/// Home page section, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeSection {
    /// Hero.
    Top,
    Publicaciones,
    Trabajos,
    Servicios,
    Opiniones,
    Sobre,
    Contacto,
}

impl HomeSection {
    pub const ALL: [Self; 7] = [
        Self::Top,
        Self::Publicaciones,
        Self::Trabajos,
        Self::Servicios,
        Self::Opiniones,
        Self::Sobre,
        Self::Contacto,
    ];

    /// Element id of the section.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Publicaciones => "publicaciones",
            Self::Trabajos => "trabajos",
            Self::Servicios => "servicios",
            Self::Opiniones => "opiniones",
            Self::Sobre => "sobre",
            Self::Contacto => "contacto",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}
