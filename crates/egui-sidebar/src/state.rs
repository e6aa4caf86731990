use std::fmt;

/// Styling label derived from the desktop open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelLabel {
    Expanded,
    Collapsed,
}

impl PanelLabel {
    pub fn from_open(open: bool) -> Self {
        if open {
            PanelLabel::Expanded
        } else {
            PanelLabel::Collapsed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelLabel::Expanded => "expanded",
            PanelLabel::Collapsed => "collapsed",
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, PanelLabel::Expanded)
    }
}

impl fmt::Display for PanelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a controller.
///
/// `is_narrow_viewport` decides which of the two open flags is live. The
/// other one keeps its last value but is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub desktop_open: bool,
    pub mobile_open: bool,
    pub is_narrow_viewport: bool,
}

impl PanelState {
    pub fn new(desktop_open: bool) -> Self {
        Self {
            desktop_open,
            ..Default::default()
        }
    }

    /// Only meaningful while the viewport is wide.
    pub fn label(&self) -> PanelLabel {
        PanelLabel::from_open(self.desktop_open)
    }

    /// The open flag of whichever branch the viewport currently selects.
    pub fn live_open(&self) -> bool {
        if self.is_narrow_viewport {
            self.mobile_open
        } else {
            self.desktop_open
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRequest {
    Toggle,
    SetDesktop(bool),
    SetMobile(bool),
}

/// Outcome of [`resolve`]. Only `Desktop` carries a persistence effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelChange {
    Desktop(bool),
    Mobile(bool),
}

impl PanelChange {
    pub fn value(&self) -> bool {
        match *self {
            PanelChange::Desktop(v) | PanelChange::Mobile(v) => v,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, PanelChange::Desktop(_))
    }
}

/// Pure transition function: computes what a request does to `state`
/// without touching it or any store.
pub fn resolve(request: PanelRequest, state: &PanelState) -> PanelChange {
    match request {
        PanelRequest::Toggle if state.is_narrow_viewport => PanelChange::Mobile(!state.mobile_open),
        PanelRequest::Toggle => PanelChange::Desktop(!state.desktop_open),
        PanelRequest::SetDesktop(value) => PanelChange::Desktop(value),
        PanelRequest::SetMobile(value) => PanelChange::Mobile(value),
    }
}

pub type OpenChangeFn = Box<dyn FnMut(bool)>;

/// Who holds the authoritative desktop value. Picked once at construction.
pub enum OpenMode {
    Owned(bool),
    /// The owner keeps the value and pushes it back through
    /// [`OpenMode::sync`]; requests only reach `on_change`.
    Delegated {
        value: bool,
        on_change: OpenChangeFn,
    },
}

impl OpenMode {
    pub fn current(&self) -> bool {
        match self {
            OpenMode::Owned(value) => *value,
            OpenMode::Delegated { value, .. } => *value,
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, OpenMode::Delegated { .. })
    }

    /// Apply a computed desktop value according to the ownership rule.
    pub fn request(&mut self, next: bool) {
        match self {
            OpenMode::Owned(value) => *value = next,
            OpenMode::Delegated { on_change, .. } => on_change(next),
        }
    }

    /// Mirror the owner's value. Ignored in owned mode.
    pub fn sync(&mut self, next: bool) -> bool {
        match self {
            OpenMode::Owned(_) => false,
            OpenMode::Delegated { value, .. } => {
                *value = next;
                true
            }
        }
    }
}

impl fmt::Debug for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
            OpenMode::Delegated { value, .. } => f
                .debug_struct("Delegated")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn wide(desktop_open: bool) -> PanelState {
        PanelState::new(desktop_open)
    }

    fn narrow(mobile_open: bool) -> PanelState {
        PanelState {
            desktop_open: true,
            mobile_open,
            is_narrow_viewport: true,
        }
    }

    #[test]
    fn label_follows_desktop_flag() {
        assert_eq!(wide(true).label(), PanelLabel::Expanded);
        assert_eq!(wide(false).label(), PanelLabel::Collapsed);
        assert_eq!(PanelLabel::Expanded.to_string(), "expanded");
        assert_eq!(PanelLabel::Collapsed.as_str(), "collapsed");
    }

    #[test]
    fn toggle_picks_branch_from_viewport() {
        assert_eq!(
            resolve(PanelRequest::Toggle, &wide(true)),
            PanelChange::Desktop(false)
        );
        assert_eq!(
            resolve(PanelRequest::Toggle, &narrow(false)),
            PanelChange::Mobile(true)
        );
    }

    #[test]
    fn explicit_desktop_request_ignores_viewport() {
        let change = resolve(PanelRequest::SetDesktop(false), &narrow(true));
        assert_eq!(change, PanelChange::Desktop(false));
        assert!(change.is_persisted());
    }

    #[test]
    fn mobile_changes_are_never_persisted() {
        let change = resolve(PanelRequest::SetMobile(true), &wide(true));
        assert_eq!(change, PanelChange::Mobile(true));
        assert!(!change.is_persisted());
    }

    #[test]
    fn live_open_tracks_selected_branch() {
        assert!(narrow(true).live_open());
        assert!(!narrow(false).live_open());
        assert!(wide(true).live_open());
    }

    #[test]
    fn delegated_mode_forwards_without_storing() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut mode = OpenMode::Delegated {
            value: true,
            on_change: Box::new(move |v| sink.borrow_mut().push(v)),
        };

        mode.request(false);
        assert!(mode.current());
        assert_eq!(*seen.borrow(), vec![false]);

        assert!(mode.sync(false));
        assert!(!mode.current());
    }

    #[test]
    fn owned_mode_stores_and_ignores_sync() {
        let mut mode = OpenMode::Owned(true);
        mode.request(false);
        assert!(!mode.current());
        assert!(!mode.sync(true));
        assert!(!mode.current());
    }
}
