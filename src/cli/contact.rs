//! `estudio contact`: run the contact form rules and print the deep link.

use anyhow::{Result, bail};
use owo_colors::Style;

use crate::config::SiteConfig;
use crate::contact::{ContactForm, Field, FieldError};
use crate::log;
use crate::logger::paint;
use crate::utils::plural_count;

/// Fill the form the way a visitor would, then submit it (or, with
/// `check`, only report what the form shows so far).
pub fn contact_link(config: &SiteConfig, name: &str, message: &str, check: bool) -> Result<()> {
    let mut form = fill(name, message);

    if !check {
        if let Ok(link) = form.submit(&config.contact) {
            println!("{link}");
            return Ok(());
        }
    }

    let shown = shown_errors(&form);
    for error in &shown {
        eprintln!("{} {}: {}", paint("→", Style::new().red()), error.field().label(), error);
    }
    if !shown.is_empty() {
        bail!("contact form has {}", plural_count(shown.len(), "error"));
    }
    if form.is_valid() {
        log!("contact"; "form is ready to send");
    }
    Ok(())
}

/// Every non-empty argument counts as a field the visitor typed into and left.
fn fill(name: &str, message: &str) -> ContactForm {
    let mut form = ContactForm::default();
    for (field, value) in [(Field::Name, name), (Field::Message, message)] {
        form.set(field, value);
        if !value.is_empty() {
            form.touch(field);
        }
    }
    form
}

fn shown_errors(form: &ContactForm) -> Vec<FieldError> {
    Field::ALL
        .into_iter()
        .filter_map(|field| form.visible_error(field))
        .collect()
}
