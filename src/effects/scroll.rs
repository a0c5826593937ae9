//! Scroll restoration against the host viewport.

/// Distance kept between the top of the viewport and the list container.
pub const SCROLL_MARGIN: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Window the listing is rendered in.
pub trait Viewport: Send + Sync {
    /// Top edge of the list container relative to the viewport, or `None`
    /// when no container is mounted.
    fn container_top(&self) -> Option<f64>;

    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
}

/// Smooth-scroll so the container sits `SCROLL_MARGIN` below the top of
/// the viewport. Returns the target offset, or `None` if nothing is mounted.
pub fn restore_scroll<V: Viewport + ?Sized>(viewport: &V) -> Option<f64> {
    let top = viewport.container_top()? + viewport.scroll_offset() - SCROLL_MARGIN;
    viewport.scroll_to(top, ScrollBehavior::Smooth);
    Some(top)
}
