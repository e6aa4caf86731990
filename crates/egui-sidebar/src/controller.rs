use crate::persist::{NoopStore, PreferenceCookie, PreferenceStore};
use crate::shortcut::{ShortcutListener, SIDEBAR_KEYBOARD_SHORTCUT};
use crate::state::{resolve, OpenChangeFn, OpenMode, PanelChange, PanelLabel, PanelRequest, PanelState};
use crate::viewport::{viewport_width, ViewportObserver, MOBILE_BREAKPOINT};
use crate::view::{Collapsible, Side};
use egui::{Context, KeyboardShortcut};
use tracing::{debug, warn};

pub struct SidebarConfig {
    pub default_open: bool,
    pub controlled_open: Option<bool>,
    pub on_open_change: Option<OpenChangeFn>,
    pub breakpoint: f32,
    pub shortcut: KeyboardShortcut,
    pub side: Side,
    pub collapsible: Collapsible,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            default_open: true,
            controlled_open: None,
            on_open_change: None,
            breakpoint: MOBILE_BREAKPOINT,
            shortcut: SIDEBAR_KEYBOARD_SHORTCUT,
            side: Side::Left,
            collapsible: Collapsible::Offcanvas,
        }
    }
}

impl SidebarConfig {
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Hand ownership of the desktop value to the caller.
    pub fn controlled(mut self, open: bool, on_change: impl FnMut(bool) + 'static) -> Self {
        self.controlled_open = Some(open);
        self.on_open_change = Some(Box::new(on_change));
        self
    }

    /// Notified after every desktop change. In controlled mode this is the
    /// delegate itself.
    pub fn on_open_change(mut self, on_change: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(on_change));
        self
    }

    pub fn breakpoint(mut self, breakpoint: f32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn shortcut(mut self, shortcut: KeyboardShortcut) -> Self {
        self.shortcut = shortcut;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn collapsible(mut self, collapsible: Collapsible) -> Self {
        self.collapsible = collapsible;
        self
    }
}

/// Single source of truth for the navigation panel.
///
/// The desktop value lives in an [`OpenMode`]; the overlay flag and the
/// viewport observer live here. Desktop changes go through
/// [`SidebarController::apply`], which is the only place that persists.
pub struct SidebarController {
    mode: OpenMode,
    observer: Option<OpenChangeFn>,
    mobile_open: bool,
    viewport: ViewportObserver,
    listener: ShortcutListener,
    store: Box<dyn PreferenceStore>,
    side: Side,
    collapsible: Collapsible,
}

impl SidebarController {
    pub fn new(config: SidebarConfig) -> Self {
        Self::with_store(config, NoopStore)
    }

    pub fn with_store(config: SidebarConfig, store: impl PreferenceStore + 'static) -> Self {
        let SidebarConfig {
            default_open,
            controlled_open,
            on_open_change,
            breakpoint,
            shortcut,
            side,
            collapsible,
        } = config;

        let (mode, observer) = match controlled_open {
            Some(value) => (
                OpenMode::Delegated {
                    value,
                    on_change: on_open_change.unwrap_or_else(|| Box::new(|_| {})),
                },
                None,
            ),
            None => (OpenMode::Owned(default_open), on_open_change),
        };

        Self {
            mode,
            observer,
            mobile_open: false,
            viewport: ViewportObserver::new(breakpoint),
            listener: ShortcutListener::new(shortcut),
            store: Box::new(store),
            side,
            collapsible,
        }
    }

    /// Attach the shortcut listener and read the viewport width once.
    /// Mounting twice only refreshes the width.
    pub fn mount(&mut self, width: Option<f32>) {
        self.viewport.observe(width);
        if self.listener.is_attached() {
            return;
        }
        self.listener.attach();
        debug!(
            narrow = self.viewport.is_narrow(),
            state = %self.state(),
            "sidebar mounted"
        );
    }

    pub fn unmount(&mut self) {
        self.listener.detach();
        debug!("sidebar unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_attached()
    }

    /// Per-frame input pass while mounted: follows the viewport and handles
    /// the shortcut. Returns the number of shortcut toggles applied.
    pub fn begin_frame(&mut self, ctx: &Context) -> usize {
        if !self.is_mounted() {
            return 0;
        }
        self.observe_viewport(viewport_width(ctx));
        let hits = self.listener.consume(ctx);
        for _ in 0..hits {
            self.toggle();
        }
        hits
    }

    /// Only ever writes `is_narrow_viewport`.
    pub fn observe_viewport(&mut self, width: Option<f32>) -> bool {
        let changed = self.viewport.observe(width);
        if changed {
            debug!(narrow = self.viewport.is_narrow(), "sidebar viewport changed");
        }
        changed
    }

    /// Key handler used by [`SidebarController::begin_frame`]. Returns `true`
    /// when the key matched and the panel toggled.
    pub fn handle_key(&mut self, key: egui::Key, modifiers: egui::Modifiers) -> bool {
        if !self.listener.is_attached() || !self.listener.matches(key, modifiers) {
            return false;
        }
        self.toggle();
        true
    }

    pub fn toggle(&mut self) {
        self.apply(PanelRequest::Toggle);
    }

    pub fn open(&mut self, value: bool) {
        self.apply(PanelRequest::SetDesktop(value));
    }

    pub fn close(&mut self) {
        self.open(false);
    }

    pub fn set_mobile_open(&mut self, value: bool) {
        self.apply(PanelRequest::SetMobile(value));
    }

    /// Push the owner's value in controlled mode. No persistence write.
    pub fn sync_controlled(&mut self, value: bool) {
        if !self.mode.sync(value) {
            warn!("sync_controlled called on an uncontrolled sidebar, ignoring");
        }
    }

    pub fn apply(&mut self, request: PanelRequest) -> PanelChange {
        let change = resolve(request, &self.panel_state());
        match change {
            PanelChange::Mobile(value) => {
                self.mobile_open = value;
                debug!(mobile_open = value, "sidebar overlay changed");
            }
            PanelChange::Desktop(value) => {
                self.mode.request(value);
                if let Some(observer) = self.observer.as_mut() {
                    observer(value);
                }
                self.persist(value);
                debug!(
                    open = value,
                    delegated = self.mode.is_delegated(),
                    "sidebar desktop state changed"
                );
            }
        }
        change
    }

    fn persist(&mut self, open: bool) {
        let cookie = PreferenceCookie::sidebar_state(open);
        if let Err(err) = self.store.write(&cookie) {
            warn!("failed to persist {cookie}: {err}");
        }
    }

    pub fn panel_state(&self) -> PanelState {
        PanelState {
            desktop_open: self.mode.current(),
            mobile_open: self.mobile_open,
            is_narrow_viewport: self.viewport.is_narrow(),
        }
    }

    pub fn state(&self) -> PanelLabel {
        PanelLabel::from_open(self.mode.current())
    }

    pub fn open_value(&self) -> bool {
        self.mode.current()
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_narrow()
    }

    pub fn mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn is_controlled(&self) -> bool {
        self.mode.is_delegated()
    }

    pub fn shortcut(&self) -> KeyboardShortcut {
        self.listener.shortcut()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn collapsible(&self) -> Collapsible {
        self.collapsible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SidebarError;
    use crate::persist::MemoryStore;
    use egui::{Key, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn write(&mut self, _cookie: &PreferenceCookie) -> Result<(), SidebarError> {
            Err(SidebarError::Persist("storage unavailable".into()))
        }
    }

    #[test]
    fn toggles_alternate_from_initial_value() {
        let mut sidebar = SidebarController::new(SidebarConfig::default().default_open(false));
        sidebar.mount(Some(1024.0));

        let mut seen = vec![sidebar.state()];
        for _ in 0..4 {
            sidebar.toggle();
            seen.push(sidebar.state());
        }
        assert_eq!(
            seen,
            vec![
                PanelLabel::Collapsed,
                PanelLabel::Expanded,
                PanelLabel::Collapsed,
                PanelLabel::Expanded,
                PanelLabel::Collapsed,
            ]
        );
    }

    #[test]
    fn open_is_idempotent() {
        let store = MemoryStore::new();
        let mut sidebar = SidebarController::with_store(SidebarConfig::default(), store.clone());
        sidebar.open(true);
        sidebar.open(true);
        assert_eq!(sidebar.state(), PanelLabel::Expanded);
        sidebar.close();
        assert_eq!(sidebar.state(), PanelLabel::Collapsed);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let mut sidebar = SidebarController::with_store(SidebarConfig::default(), BrokenStore);
        sidebar.toggle();
        assert_eq!(sidebar.state(), PanelLabel::Collapsed);
    }

    #[test]
    fn observer_sees_owned_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut sidebar = SidebarController::new(
            SidebarConfig::default().on_open_change(move |v| sink.borrow_mut().push(v)),
        );
        sidebar.toggle();
        sidebar.open(true);
        assert_eq!(*seen.borrow(), vec![false, true]);
        assert!(sidebar.open_value());
    }

    #[test]
    fn viewport_observer_never_touches_open_flags() {
        let mut sidebar = SidebarController::new(SidebarConfig::default());
        sidebar.mount(Some(1200.0));
        sidebar.set_mobile_open(true);
        sidebar.observe_viewport(Some(400.0));
        assert!(sidebar.is_mobile());
        let state = sidebar.panel_state();
        assert!(state.desktop_open);
        assert!(state.mobile_open);
    }

    #[test]
    fn key_handler_requires_mount() {
        let mut sidebar = SidebarController::new(SidebarConfig::default());
        assert!(!sidebar.handle_key(Key::B, Modifiers::COMMAND));
        assert_eq!(sidebar.state(), PanelLabel::Expanded);

        sidebar.mount(None);
        assert!(sidebar.handle_key(Key::B, Modifiers::COMMAND));
        assert_eq!(sidebar.state(), PanelLabel::Collapsed);

        sidebar.unmount();
        assert!(!sidebar.handle_key(Key::B, Modifiers::COMMAND));
        assert_eq!(sidebar.state(), PanelLabel::Collapsed);
    }

    #[test]
    fn custom_breakpoint_is_respected() {
        let mut sidebar = SidebarController::new(SidebarConfig::default().breakpoint(1024.0));
        sidebar.mount(Some(900.0));
        assert!(sidebar.is_mobile());
    }
}
