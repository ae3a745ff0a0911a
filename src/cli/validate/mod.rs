//! Site validation command.
//!
//! Everything reported here degrades silently on the site: a placeholder
//! instead of an image, or a detail link falling through to home.

mod report;

use anyhow::Result;

use crate::asset::{AssetIndex, AssetManifest};
use crate::config::SiteConfig;
use crate::content::{ContentStore, Post, Project};
use crate::core::DetailKind;
use crate::log;
use crate::utils::plural_count;

use super::common::{load_content, load_manifest};
use report::{Section, ValidationReport};

/// Validate content against the asset manifest
pub fn validate_site(config: &SiteConfig, warn_only: bool) -> Result<()> {
    let store = load_content(config)?;
    let manifest = load_manifest(config)?;

    log!(
        "validate";
        "checking {}, {}, {} and {}",
        plural_count(store.projects().len(), "project"),
        plural_count(store.posts().len(), "post"),
        plural_count(store.testimonials().len(), "testimonial"),
        plural_count(store.services().len(), "service")
    );

    let report = check_site(config, &store, &manifest);
    report.print();
    log!("validate"; "{}", report);

    print_summary(&report, warn_only)
}

fn check_site(config: &SiteConfig, store: &ContentStore, manifest: &AssetManifest) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_slugs(config, store, &mut report);
    check_listings(config, store, &mut report);
    check_project_images(store.projects(), manifest.index(DetailKind::Project), &mut report);
    check_post_images(store.posts(), manifest.index(DetailKind::Post), &mut report);
    check_assets(config, store, manifest, &mut report);
    report
}

/// Duplicate and missing slugs make records unreachable.
fn check_slugs(config: &SiteConfig, store: &ContentStore, report: &mut ValidationReport) {
    let source = |kind: DetailKind| match kind {
        DetailKind::Project => config.content.projects.display().to_string(),
        DetailKind::Post => config.content.posts.display().to_string(),
    };

    for dup in store.duplicates() {
        report.add(
            Section::Content,
            source(dup.kind),
            format!("`{}`", dup.slug),
            format!(
                "record #{} duplicates #{} and is unreachable",
                dup.indices.1, dup.indices.0
            ),
        );
    }

    let projects = store.projects().iter().map(|p| (p.slug.as_str(), p.title.as_str()));
    let posts = store.posts().iter().map(|p| (p.slug.as_str(), p.title.as_str()));
    for (kind, records) in [
        (DetailKind::Project, without_slug(projects)),
        (DetailKind::Post, without_slug(posts)),
    ] {
        for (i, title) in records {
            report.add(
                Section::Content,
                source(kind),
                format!("record #{i} `{title}`"),
                "has no slug and no detail page",
            );
        }
    }
}

/// Blank entries render as empty quotes, cards or sections.
fn check_listings(config: &SiteConfig, store: &ContentStore, report: &mut ValidationReport) {
    let testimonials = config.content.testimonials.display().to_string();
    for (i, t) in store.testimonials().iter().enumerate() {
        if t.name.trim().is_empty() || t.text.trim().is_empty() {
            report.add(Section::Content, &testimonials, format!("testimonial #{i}"), "is blank");
        }
    }

    let services = config.content.services.display().to_string();
    for (i, service) in store.services().iter().enumerate() {
        if service.title().trim().is_empty() {
            report.add(Section::Content, &services, format!("service #{i}"), "has no title");
        }
        if service.description().trim().is_empty() {
            report.add(Section::Content, &services, format!("service #{i}"), "has no description");
        }
    }

    for post in store.posts() {
        for (i, _) in post.blocks.iter().enumerate().filter(|(_, b)| b.is_empty()) {
            report.add(
                Section::Content,
                config.content.posts.display().to_string(),
                format!("`{}` block #{i}", post.slug),
                "is empty",
            );
        }
    }
}

fn without_slug<'a>(records: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<(usize, &'a str)> {
    records
        .enumerate()
        .filter(|(_, (slug, _))| slug.is_empty())
        .map(|(i, (_, title))| (i, title))
        .collect()
}

fn check_project_images(projects: &[Project], index: &AssetIndex, report: &mut ValidationReport) {
    for project in projects.iter().filter(|p| !p.slug.is_empty()) {
        let source = DetailKind::Project.href(&project.slug);
        if index.lookup(&project.slug, Project::CARD_VARIANT).is_none() {
            report.add(
                Section::Images,
                &source,
                Project::CARD_VARIANT,
                "missing, card shows a placeholder",
            );
        }
        missing_gallery(&source, &project.slug, &project.gallery, index, report);
    }
}

fn check_post_images(posts: &[Post], index: &AssetIndex, report: &mut ValidationReport) {
    for post in posts.iter().filter(|p| !p.slug.is_empty()) {
        let source = DetailKind::Post.href(&post.slug);
        let cover = post.cover_variant();
        if index.lookup(&post.slug, cover).is_none() {
            report.add(
                Section::Images,
                &source,
                cover,
                "missing, card shows a placeholder and the page has no hero",
            );
        }
        missing_gallery(&source, &post.slug, &post.gallery, index, report);
    }
}

fn missing_gallery(
    source: &str,
    slug: &str,
    gallery: &[String],
    index: &AssetIndex,
    report: &mut ValidationReport,
) {
    for name in gallery.iter().filter(|name| index.lookup(slug, name).is_none()) {
        report.add(Section::Images, source, name, "listed in gallery but not found");
    }
}

/// Collisions recorded by the manifest, and folders no record points at.
fn check_assets(
    config: &SiteConfig,
    store: &ContentStore,
    manifest: &AssetManifest,
    report: &mut ValidationReport,
) {
    for c in &manifest.collisions {
        report.add(
            Section::Assets,
            format!("{}/{}", c.collection, c.slug),
            format!("`{}`", c.variant),
            format!("`{}` shadows `{}`", c.kept, c.shadowed),
        );
    }

    for slug in manifest.projects.slugs().filter(|s| store.project(s).is_none()) {
        report.add(Section::Assets, &config.assets.projects, slug, "no project with this slug");
    }
    for slug in manifest.posts.slugs().filter(|s| store.post(s).is_none()) {
        report.add(Section::Assets, &config.assets.posts, slug, "no post with this slug");
    }
}

fn print_summary(report: &ValidationReport, warn_only: bool) -> Result<()> {
    let mut parts = Vec::new();
    for (section, noun) in [
        (Section::Content, "data file"),
        (Section::Images, "page"),
        (Section::Assets, "asset folder"),
    ] {
        let n = report.source_count(section);
        if n > 0 {
            parts.push(format!("{} with problems", plural_count(n, noun)));
        }
    }

    if parts.is_empty() {
        return Ok(());
    }
    if warn_only {
        log!("warning"; "found {}", parts.join(", "));
        return Ok(());
    }
    anyhow::bail!("found {}", parts.join(", "))
}
