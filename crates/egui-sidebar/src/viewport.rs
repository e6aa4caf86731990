use egui::Context;

/// Widths below this many points use the overlay branch.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// `None` means the width is unknown (no window yet) and counts as wide.
pub fn is_narrow_width(width: Option<f32>, breakpoint: f32) -> bool {
    width.is_some_and(|w| w < breakpoint)
}

pub fn viewport_width(ctx: &Context) -> Option<f32> {
    let width = ctx.screen_rect().width();
    (width.is_finite() && width > 0.0).then_some(width)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportObserver {
    breakpoint: f32,
    is_narrow: bool,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(MOBILE_BREAKPOINT)
    }
}

impl ViewportObserver {
    pub fn new(breakpoint: f32) -> Self {
        Self {
            breakpoint,
            is_narrow: false,
        }
    }

    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    pub fn is_narrow(&self) -> bool {
        self.is_narrow
    }

    /// Returns `true` when the width crossed the breakpoint.
    pub fn observe(&mut self, width: Option<f32>) -> bool {
        let narrow = is_narrow_width(width, self.breakpoint);
        let changed = narrow != self.is_narrow;
        self.is_narrow = narrow;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_boundary() {
        assert!(is_narrow_width(Some(767.0), MOBILE_BREAKPOINT));
        assert!(!is_narrow_width(Some(768.0), MOBILE_BREAKPOINT));
        assert!(!is_narrow_width(None, MOBILE_BREAKPOINT));
    }

    #[test]
    fn observe_reports_crossings_only() {
        let mut observer = ViewportObserver::default();
        assert!(!observer.observe(Some(1280.0)));
        assert!(observer.observe(Some(500.0)));
        assert!(observer.is_narrow());
        assert!(!observer.observe(Some(600.0)));
        assert!(observer.observe(None));
        assert!(!observer.is_narrow());
    }
}
