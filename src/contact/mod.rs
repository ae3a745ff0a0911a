//! Contact form hand-off to a WhatsApp deep link.
//!
//! Nothing is sent from the site: a valid form turns into a
//! `https://wa.me/<phone>?text=...` link the visitor opens.

use thiserror::Error;

use crate::config::ContactConfig;
use crate::core::slug::encode_component;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Ingresá tu nombre")]
    NameTooShort,

    #[error("Contá un poco más (mín. 10 caracteres)")]
    MessageTooShort,
}

impl Field {
    pub const ALL: [Self; 2] = [Self::Name, Self::Message];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "nombre",
            Self::Message => "mensaje",
        }
    }
}

impl FieldError {
    pub fn field(self) -> Field {
        match self {
            Self::NameTooShort => Field::Name,
            Self::MessageTooShort => Field::Message,
        }
    }
}

/// Form state: values plus which errors the visitor gets to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    message: String,
    name_touched: bool,
    message_touched: bool,
    submitted: bool,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => self.name = value.into(),
            Field::Message => self.message = value.into(),
        }
    }

    /// The field lost focus.
    pub fn touch(&mut self, field: Field) {
        match field {
            Field::Name => self.name_touched = true,
            Field::Message => self.message_touched = true,
        }
    }

    pub fn name(&self) -> &str {
        self.name.trim()
    }

    pub fn message(&self) -> &str {
        self.message.trim()
    }

    /// Validation result of one field, shown or not.
    pub fn error(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name => (self.name().chars().count() < MIN_NAME_CHARS)
                .then_some(FieldError::NameTooShort),
            Field::Message => (self.message().chars().count() < MIN_MESSAGE_CHARS)
                .then_some(FieldError::MessageTooShort),
        }
    }

    /// The error rendered under a field: only after it was touched or a
    /// submit was attempted.
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        let touched = match field {
            Field::Name => self.name_touched,
            Field::Message => self.message_touched,
        };
        if touched || self.submitted {
            self.error(field)
        } else {
            None
        }
    }

    pub fn errors(&self) -> Vec<FieldError> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.error(field))
            .collect()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Attempt a submit. A rejected submit still reveals every error.
    pub fn submit(&mut self, config: &ContactConfig) -> Result<String, Vec<FieldError>> {
        self.submitted = true;
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(deep_link(config, &message_text(self.name(), self.message())))
    }
}

/// Pre-filled chat text.
pub fn message_text(name: &str, message: &str) -> String {
    format!("Hola, soy {name}.\n\nMi proyecto: {message}")
}

/// `<base_url>/<phone>?text=<text>`, with the text encoded like
/// `encodeURIComponent`.
pub fn deep_link(config: &ContactConfig, text: &str) -> String {
    format!(
        "{}/{}?text={}",
        config.base_url.trim_end_matches('/'),
        config.phone,
        encode_component(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_boundary() {
        let form = ContactForm::new("A", "Quiero renovar la cocina");
        assert_eq!(form.errors(), [FieldError::NameTooShort]);

        let form = ContactForm::new("Al", "Quiero renovar la cocina");
        assert!(form.is_valid());
    }

    #[test]
    fn test_message_length_boundary() {
        let form = ContactForm::new("Ana", "0123456789");
        assert!(form.is_valid());

        let form = ContactForm::new("Ana", "012345678");
        assert_eq!(form.errors(), [FieldError::MessageTooShort]);
    }

    #[test]
    fn test_lengths_count_trimmed_chars() {
        // Padding doesn't count, accented letters count once
        let form = ContactForm::new("  A  ", "  ñañañaña  ");
        assert_eq!(
            form.errors(),
            [FieldError::NameTooShort, FieldError::MessageTooShort]
        );
        let form = ContactForm::new("Sé", "ñañañañaña");
        assert!(form.is_valid());
    }

    #[test]
    fn test_errors_hidden_until_touched_or_submitted() {
        let mut form = ContactForm::default();
        assert_eq!(form.visible_error(Field::Name), None);

        form.touch(Field::Name);
        assert_eq!(form.visible_error(Field::Name), Some(FieldError::NameTooShort));
        assert_eq!(form.visible_error(Field::Message), None);

        assert!(form.submit(&ContactConfig::default()).is_err());
        assert_eq!(
            form.visible_error(Field::Message),
            Some(FieldError::MessageTooShort)
        );
    }

    #[test]
    fn test_submit_builds_deep_link() {
        let mut form = ContactForm::default();
        form.set(Field::Name, " Sol ");
        form.set(Field::Message, "Living de 4x5 m, estilo nórdico");

        let link = form.submit(&ContactConfig::default()).unwrap();
        assert_eq!(
            link,
            "https://wa.me/5492914441533?text=Hola%2C%20soy%20Sol.%0A%0AMi%20proyecto%3A%20Living%20de%204x5%20m%2C%20estilo%20n%C3%B3rdico"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::NameTooShort.to_string(), "Ingresá tu nombre");
        assert_eq!(
            FieldError::MessageTooShort.to_string(),
            "Contá un poco más (mín. 10 caracteres)"
        );
        assert_eq!(FieldError::MessageTooShort.field(), Field::Message);
    }

    #[test]
    fn test_deep_link_trailing_slash() {
        let config = ContactConfig {
            base_url: "https://wa.me/".into(),
            phone: "123".into(),
        };
        assert_eq!(deep_link(&config, "a b"), "https://wa.me/123?text=a%20b");
    }
}
