use egui::{Context, Event, Key, KeyboardShortcut, Modifiers};

/// Cmd+B on macOS, Ctrl+B elsewhere.
pub const SIDEBAR_KEYBOARD_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND, Key::B);

/// Watches the frame's key events for the toggle shortcut while attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortcutListener {
    shortcut: KeyboardShortcut,
    attached: bool,
}

impl Default for ShortcutListener {
    fn default() -> Self {
        Self::new(SIDEBAR_KEYBOARD_SHORTCUT)
    }
}

impl ShortcutListener {
    pub fn new(shortcut: KeyboardShortcut) -> Self {
        Self {
            shortcut,
            attached: false,
        }
    }

    pub fn shortcut(&self) -> KeyboardShortcut {
        self.shortcut
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Shift and alt must match exactly, so Cmd+Shift+B stays free for others.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        let wanted = self.shortcut.modifiers;
        key == self.shortcut.logical_key
            && (!wanted.command || modifiers.command)
            && (!wanted.ctrl || modifiers.ctrl)
            && (!wanted.mac_cmd || modifiers.mac_cmd)
            && modifiers.alt == wanted.alt
            && modifiers.shift == wanted.shift
    }

    /// Removes matching key presses from this frame's input and returns how
    /// many there were. Everything else stays queued for other widgets.
    pub fn consume(&self, ctx: &Context) -> usize {
        if !self.attached {
            return 0;
        }
        ctx.input_mut(|input| {
            let before = input.events.len();
            input.events.retain(|event| {
                !matches!(
                    event,
                    Event::Key { key, pressed: true, modifiers, .. } if self.matches(*key, *modifiers)
                )
            });
            before - input.events.len()
        })
    }

    pub fn format(&self, ctx: &Context) -> String {
        ctx.format_shortcut(&self.shortcut)
    }
}
