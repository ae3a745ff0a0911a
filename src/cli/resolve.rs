//! `estudio resolve`: replay a navigation session against the site content.
//!
//! Each step drives the router the way the browser would, then the view is
//! re-resolved and the next frame runs (pending anchor scrolls).

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use super::args::ResolveArgs;
use crate::asset::AssetManifest;
use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::core::Location;
use crate::router::{LinkActivation, MemoryHistory, Router};
use crate::view::{LoadState, RenderedPage, View, ViewImages, resolve};
use crate::{debug, log};

use super::common::{load_content, load_manifest};

/// One browser event of a replayed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'a> {
    Back,
    Forward,
    /// Un-intercepted `<a href="#anchor">`.
    Fragment(&'a str),
    /// `<img>` load event, by URL.
    Loaded(&'a str),
    /// `<img>` error event, by URL.
    Broken(&'a str),
    /// Click on an href.
    Link(&'a str),
}

impl<'a> Step<'a> {
    fn parse(raw: &'a str) -> Self {
        match raw {
            "back" => Self::Back,
            "forward" => Self::Forward,
            _ => match raw.split_once(':') {
                Some(("hash", anchor)) => Self::Fragment(anchor.trim_start_matches('#')),
                Some(("load", url)) => Self::Loaded(url),
                Some(("error", url)) => Self::Broken(url),
                _ => Self::Link(raw),
            },
        }
    }
}

/// Final state of a session, printed as JSON.
#[derive(Debug, Serialize)]
struct Outcome<'a> {
    href: String,
    location: Location,
    history: &'a [String],
    cursor: usize,
    /// Anchors scrolled into view, across all frames.
    scrolled: Vec<String>,
    /// External links that were left to the browser.
    external: Vec<String>,
    /// Images on the final page still showing the loading skeleton.
    skeletons: Vec<&'a str>,
    #[serde(flatten)]
    view: View<'a>,
    images: ViewImages<'a>,
}

pub fn resolve_session(config: &SiteConfig, args: &ResolveArgs) -> Result<()> {
    let store = load_content(config)?;
    let manifest = load_manifest(config)?;

    let session = Session::replay(&args.from, &args.steps, &store);
    let outcome = session.outcome(&store, &manifest);

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{json}");
    Ok(())
}

/// A router plus what happened while driving it.
struct Session {
    router: Router<MemoryHistory>,
    scrolled: Vec<String>,
    external: Vec<String>,
    /// Image URL → load state. Loaded images stay cached across views.
    loads: BTreeMap<String, LoadState>,
}

impl Session {
    fn replay(from: &str, steps: &[String], store: &ContentStore) -> Self {
        let mut session = Self {
            router: Router::new(MemoryHistory::new(from)),
            scrolled: Vec::new(),
            external: Vec::new(),
            loads: BTreeMap::new(),
        };
        session.frame(store);

        for raw in steps {
            session.apply(Step::parse(raw));
            debug!("resolve"; "{} -> {}", raw, session.router.location());
            for anchor in session.router.pending_scrolls() {
                debug!("resolve"; "scroll to `#{}` queued for the next frame", anchor);
            }
            session.frame(store);
        }
        session
    }

    fn apply(&mut self, step: Step<'_>) {
        match step {
            Step::Back => {
                if !self.router.back() {
                    log!("resolve"; "already at the first entry, `back` ignored");
                }
            }
            Step::Forward => {
                if !self.router.forward() {
                    log!("resolve"; "already at the last entry, `forward` ignored");
                }
            }
            Step::Fragment(anchor) => self.router.follow_fragment(anchor),
            Step::Loaded(url) => self.loads.entry(url.to_string()).or_default().on_load(),
            Step::Broken(url) => self.loads.entry(url.to_string()).or_default().on_error(),
            Step::Link(href) => {
                if let LinkActivation::PassThrough(href) = self.router.activate_link(href) {
                    debug!("resolve"; "external link `{}` left to the browser", href);
                    self.external.push(href);
                }
            }
        }
    }

    /// Render the current view and run the queued scrolls against it.
    fn frame(&mut self, store: &ContentStore) {
        let view = resolve(self.router.location(), store);
        let mut page = RenderedPage::of(&view);
        self.router.on_frame(&mut page);
        self.scrolled.extend_from_slice(page.scrolled());
    }

    fn outcome<'a>(&'a self, store: &'a ContentStore, manifest: &'a AssetManifest) -> Outcome<'a> {
        let location = self.router.location();
        let view = resolve(location, store);
        let images = view.images(store, manifest);
        let skeletons = images
            .urls()
            .into_iter()
            .filter(|url| self.loads.get(*url).is_none_or(|state| state.is_pending()))
            .collect();
        Outcome {
            href: location.href(),
            location: location.clone(),
            history: self.router.history().entries(),
            cursor: self.router.history().cursor(),
            scrolled: self.scrolled.clone(),
            external: self.external.clone(),
            skeletons,
            view,
            images,
        }
    }
}
