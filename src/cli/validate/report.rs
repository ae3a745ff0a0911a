//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::Style;

use crate::logger::paint;
use crate::utils::plural_s;

/// Report sections, in print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    /// Data file problems (slugs).
    Content,
    /// Images referenced by records but absent from the manifest.
    Images,
    /// Asset tree problems (collisions, orphan folders).
    Assets,
}

impl Section {
    const ALL: [Self; 3] = [Self::Content, Self::Images, Self::Assets];

    fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Images => "images",
            Self::Assets => "assets",
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// What the finding is about (slug, variant).
    pub target: String,
    pub reason: String,
}

/// Findings per section, grouped by source (data file or asset folder).
#[derive(Debug, Default)]
pub struct ValidationReport {
    sections: BTreeMap<Section, BTreeMap<String, Vec<Finding>>>,
}

impl ValidationReport {
    pub fn add(
        &mut self,
        section: Section,
        source: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.sections
            .entry(section)
            .or_default()
            .entry(source.into())
            .or_default()
            .push(Finding {
                target: target.into(),
                reason: reason.into(),
            });
    }

    /// Number of sources with findings in `section`.
    pub fn source_count(&self, section: Section) -> usize {
        self.sections.get(&section).map_or(0, BTreeMap::len)
    }

    pub fn count(&self, section: Section) -> usize {
        self.sections
            .get(&section)
            .map_or(0, |sources| sources.values().map(Vec::len).sum())
    }

    pub fn total(&self) -> usize {
        Section::ALL.iter().map(|s| self.count(*s)).sum()
    }

    pub fn findings(&self, section: Section) -> impl Iterator<Item = (&str, &Finding)> {
        self.sections
            .get(&section)
            .into_iter()
            .flatten()
            .flat_map(|(source, findings)| findings.iter().map(move |f| (source.as_str(), f)))
    }

    /// Print the full report to stderr (content -> images -> assets).
    pub fn print(&self) {
        for (section, sources) in &self.sections {
            print_section(section.name(), sources);
        }
    }
}

fn print_section(name: &str, sources: &BTreeMap<String, Vec<Finding>>) {
    if sources.is_empty() {
        return;
    }
    eprintln!();

    let source_count = sources.len();
    let count: usize = sources.values().map(Vec::len).sum();

    let dim = Style::new().dimmed();
    eprintln!(
        "{} {}",
        paint(name, Style::new().red().bold()),
        paint(
            format!(
                "({source_count} source{}, {count} problem{})",
                plural_s(source_count),
                plural_s(count)
            ),
            dim
        )
    );

    for (source, findings) in sources {
        eprintln!("{}{}{}", paint("[", dim), paint(source, Style::new().cyan()), paint("]", dim));
        for f in findings {
            eprintln!("{} {} {}", paint("→", Style::new().red()), f.target, paint(&f.reason, dim));
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        let dim = Style::new().dimmed();
        if total == 0 {
            write!(f, "{}", paint("all checks passed", Style::new().green()))
        } else {
            write!(
                f,
                "{} {} {}",
                paint("found", dim),
                paint(total, Style::new().red().bold()),
                paint(format!("problem{}", plural_s(total)), dim)
            )
        }
    }
}
