//! Client-side router.
//!
//! Single owner of the current [`Location`]. Every transition is one
//! synchronous assignment, so a view rendered after any method returns
//! always sees the settled location.
//!
//! # Transitions
//!
//! | Event                               | History        | Result                          |
//! |-------------------------------------|----------------|---------------------------------|
//! | `navigate(url)` / internal link     | push           | parsed url                      |
//! | back / forward (`on_pop_state`)     | cursor moves   | restored entry                  |
//! | legacy `#proyecto/<slug>` arrival   | replace        | `/proyecto/<slug>`, no anchor   |
//! | section hash while on a detail page | replace        | `/` keeping the anchor          |
//!
//! Whenever the location settles on `/` with an anchor, a scroll to that
//! anchor is queued for the next frame (see [`Router::on_frame`]).

mod history;
mod scroll;

pub use history::{History, MemoryHistory};
pub use scroll::{ScrollQueue, Viewport};

use crate::core::{Href, Location};
use crate::debug;

/// Outcome of a link activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkActivation {
    /// Internal link; the router navigated and the default action is suppressed.
    Handled,
    /// External link; let the browser follow it.
    PassThrough(String),
}

#[derive(Debug)]
pub struct Router<H: History> {
    history: H,
    location: Location,
    scroll: ScrollQueue,
}

impl<H: History> Router<H> {
    /// Start on the history's current entry, migrating legacy hash links.
    pub fn new(history: H) -> Self {
        let initial = Location::parse(history.current());
        let mut router = Self {
            history,
            location: Location::home(),
            scroll: ScrollQueue::default(),
        };

        match initial.legacy_redirect() {
            Some(target) => router.redirect(&initial, target),
            None => router.settle(initial),
        }
        router
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[inline]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Anchors waiting for the next frame.
    pub fn pending_scrolls(&self) -> impl Iterator<Item = &str> {
        self.scroll.pending()
    }

    /// Navigate to an internal url, adding a history entry.
    pub fn navigate(&mut self, url: &str) {
        self.push(Location::parse(url));
    }

    /// Handle a click on `href`: internal links navigate, external ones pass.
    pub fn activate_link(&mut self, href: &str) -> LinkActivation {
        match Href::classify(href) {
            Href::Internal(location) => {
                self.push(location);
                LinkActivation::Handled
            }
            Href::External(href) => LinkActivation::PassThrough(href),
        }
    }

    /// Browser back/forward restored an entry.
    pub fn on_pop_state(&mut self) {
        let restored = Location::parse(self.history.current());
        self.settle(restored);
    }

    /// The fragment changed (plain `<a href="#...">` or manual edit).
    pub fn on_hash_change(&mut self) {
        let incoming = Location::parse(self.history.current());

        if let Some(target) = incoming.legacy_redirect() {
            self.redirect(&incoming, target);
            return;
        }

        // A section link on a detail page has nothing to jump to there
        if incoming.route().is_detail() && incoming.has_anchor() {
            let target = Location::home().with_anchor(incoming.anchor());
            self.redirect(&incoming, target);
            return;
        }

        self.settle(incoming);
    }

    /// Follow an un-intercepted fragment link: the browser pushes
    /// `<current path>#anchor` and fires `hashchange`.
    pub fn follow_fragment(&mut self, anchor: &str) {
        let href = self.location.with_anchor(anchor).href();
        self.history.push(&href);
        self.on_hash_change();
    }

    /// Go back one entry. Returns `false` at the start of the session.
    pub fn back(&mut self) -> bool {
        self.traverse(-1)
    }

    /// Go forward one entry. Returns `false` at the end of the session.
    pub fn forward(&mut self) -> bool {
        self.traverse(1)
    }

    /// Run the scrolls queued for this frame. Returns how many happened.
    pub fn on_frame(&mut self, viewport: &mut impl Viewport) -> usize {
        self.scroll.flush(viewport)
    }

    fn traverse(&mut self, delta: isize) -> bool {
        if !self.history.go(delta) {
            return false;
        }
        self.on_pop_state();
        true
    }

    fn push(&mut self, location: Location) {
        self.history.push(&location.href());
        self.settle(location);
    }

    /// Replace the current entry with `target`.
    fn redirect(&mut self, from: &Location, target: Location) {
        debug!("router"; "redirect {} -> {}", from, target);
        self.history.replace(&target.href());
        self.settle(target);
    }

    fn settle(&mut self, location: Location) {
        if location.is_home() && location.has_anchor() {
            self.scroll.schedule(location.anchor());
        }
        self.location = location;
    }
}
