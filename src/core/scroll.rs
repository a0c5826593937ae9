//! Decides when the list container should be scrolled back into view.

/// Fires once per page change, skipping the first observation after mount.
#[derive(Debug, Clone, Default)]
pub struct ScrollTrigger {
    last_page: Option<u32>,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the page after a render. Returns `true` when the page differs
    /// from the previous observation; the first observation never fires.
    pub fn observe(&mut self, page: u32) -> bool {
        match self.last_page.replace(page) {
            None => false,
            Some(previous) => previous != page,
        }
    }
}
