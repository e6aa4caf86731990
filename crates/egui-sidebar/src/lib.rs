mod controller;
mod errors;
mod handle;
mod persist;
mod shortcut;
mod state;
mod view;
mod viewport;

pub use controller::{SidebarConfig, SidebarController};
pub use errors::SidebarError;
pub use handle::SidebarHandle;
pub use persist::{
    MemoryStore, NoopStore, PreferenceCookie, PreferenceStore, SIDEBAR_COOKIE_MAX_AGE,
    SIDEBAR_COOKIE_NAME, SIDEBAR_COOKIE_PATH,
};
pub use shortcut::{ShortcutListener, SIDEBAR_KEYBOARD_SHORTCUT};
pub use state::{resolve, OpenChangeFn, OpenMode, PanelChange, PanelLabel, PanelRequest, PanelState};
pub use view::{
    Collapsible, Presentation, Side, SidebarRail, SidebarTrigger, SidebarView, SIDEBAR_WIDTH,
    SIDEBAR_WIDTH_ICON, SIDEBAR_WIDTH_MOBILE,
};
pub use viewport::{is_narrow_width, viewport_width, ViewportObserver, MOBILE_BREAKPOINT};
