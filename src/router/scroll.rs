//! Next-frame scroll requests.
//!
//! Scrolling to `#contacto` right after a navigation would run before the home
//! view is rendered, so the router queues the request and the host drains it
//! on the next frame.

use std::collections::VecDeque;

/// Rendered page surface the router can scroll.
pub trait Viewport {
    /// Smooth-scroll the element with `id` into view.
    ///
    /// Returns `false` when no such element is rendered.
    fn scroll_into_view(&mut self, id: &str) -> bool;
}

/// Pending scroll targets, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollQueue {
    pending: VecDeque<String>,
}

impl ScrollQueue {
    pub fn schedule(&mut self, id: &str) {
        self.pending.push_back(id.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Run every queued request against `viewport`. Targets that are not
    /// rendered are dropped silently. Returns how many scrolls happened.
    pub fn flush(&mut self, viewport: &mut impl Viewport) -> usize {
        self.pending
            .drain(..)
            .filter(|id| viewport.scroll_into_view(id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        ids: Vec<&'static str>,
        scrolled: Vec<String>,
    }

    impl Viewport for Page {
        fn scroll_into_view(&mut self, id: &str) -> bool {
            let found = self.ids.iter().any(|i| *i == id);
            if found {
                self.scrolled.push(id.to_string());
            }
            found
        }
    }

    #[test]
    fn test_flush_skips_missing_targets() {
        let mut queue = ScrollQueue::default();
        queue.schedule("contacto");
        queue.schedule("nope");
        let mut page = Page {
            ids: vec!["contacto"],
            scrolled: vec![],
        };

        assert_eq!(queue.flush(&mut page), 1);
        assert_eq!(page.scrolled, ["contacto"]);
        assert!(queue.is_empty());
        assert_eq!(queue.flush(&mut page), 0);
    }
}
