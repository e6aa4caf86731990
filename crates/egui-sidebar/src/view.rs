use crate::errors::SidebarError;
use crate::handle::SidebarHandle;
use crate::state::PanelLabel;
use egui::{
    vec2, Area, Button, Color32, Context, CursorIcon, Frame, Id, Key, Modifiers, Order, Rect,
    Response, Sense, SidePanel, Stroke, Ui, WidgetText,
};

pub const SIDEBAR_WIDTH: f32 = 256.0;
pub const SIDEBAR_WIDTH_MOBILE: f32 = 288.0;
pub const SIDEBAR_WIDTH_ICON: f32 = 48.0;
const RAIL_WIDTH: f32 = 6.0;
const BACKDROP_ALPHA: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// What a collapsed desktop panel turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collapsible {
    /// Hidden entirely.
    #[default]
    Offcanvas,
    /// Shrunk to an icon rail.
    Icon,
    /// Always shown at full width.
    None,
}

/// Tells sidebar content what it is being drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Expanded,
    Icon,
    Overlay,
    Static,
}

impl Presentation {
    pub fn is_icon_only(&self) -> bool {
        matches!(self, Presentation::Icon)
    }
}

/// Renders the panel for whatever branch the controller is in.
#[derive(Debug, Clone)]
pub struct SidebarView {
    id: Id,
    width: f32,
    mobile_width: f32,
    icon_width: f32,
}

impl SidebarView {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id_salt),
            width: SIDEBAR_WIDTH,
            mobile_width: SIDEBAR_WIDTH_MOBILE,
            icon_width: SIDEBAR_WIDTH_ICON,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn mobile_width(mut self, width: f32) -> Self {
        self.mobile_width = width;
        self
    }

    pub fn icon_width(mut self, width: f32) -> Self {
        self.icon_width = width;
        self
    }

    /// Returns `Ok(None)` when nothing was drawn this frame.
    ///
    /// The controller is not borrowed while `add_contents` runs, so content
    /// may call back into `handle`.
    pub fn show<R>(
        self,
        ctx: &Context,
        handle: &SidebarHandle,
        add_contents: impl FnOnce(&mut Ui, Presentation) -> R,
    ) -> Result<Option<R>, SidebarError> {
        let (state, side, collapsible) =
            handle.with(|c| (c.panel_state(), c.side(), c.collapsible()))?;

        if collapsible == Collapsible::None {
            let inner = self
                .panel(side, self.width)
                .show(ctx, |ui| add_contents(ui, Presentation::Static));
            return Ok(Some(inner.inner));
        }

        if state.is_narrow_viewport {
            if !state.mobile_open {
                return Ok(None);
            }
            let (inner, dismissed) = self.show_overlay(ctx, side, add_contents);
            if dismissed {
                handle.set_mobile_open(false)?;
            }
            return Ok(Some(inner));
        }

        let inner = match (state.label(), collapsible) {
            (PanelLabel::Collapsed, Collapsible::Offcanvas) => return Ok(None),
            (PanelLabel::Collapsed, _) => self
                .panel(side, self.icon_width)
                .show(ctx, |ui| add_contents(ui, Presentation::Icon)),
            (PanelLabel::Expanded, _) => self
                .panel(side, self.width)
                .show(ctx, |ui| add_contents(ui, Presentation::Expanded)),
        };
        Ok(Some(inner.inner))
    }

    fn panel(&self, side: Side, width: f32) -> SidePanel {
        let panel = match side {
            Side::Left => SidePanel::left(self.id),
            Side::Right => SidePanel::right(self.id),
        };
        panel.resizable(false).exact_width(width)
    }

    /// Draws the backdrop and the overlay. The flag is `true` when the user
    /// clicked the backdrop or pressed escape.
    fn show_overlay<R>(
        &self,
        ctx: &Context,
        side: Side,
        add_contents: impl FnOnce(&mut Ui, Presentation) -> R,
    ) -> (R, bool) {
        let screen = ctx.screen_rect();
        let width = self.mobile_width.min(screen.width());
        let panel_rect = match side {
            Side::Left => Rect::from_min_size(screen.min, vec2(width, screen.height())),
            Side::Right => Rect::from_min_max(
                egui::pos2(screen.max.x - width, screen.min.y),
                screen.max,
            ),
        };

        let backdrop_clicked = Area::new(self.id.with("backdrop"))
            .order(Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen.size(), Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(BACKDROP_ALPHA));
                response.clicked()
            })
            .inner;

        let inner = Area::new(self.id.with("overlay"))
            .order(Order::Foreground)
            .fixed_pos(panel_rect.min)
            .show(ctx, |ui| {
                Frame::side_top_panel(ui.style())
                    .show(ui, |ui| {
                        ui.set_width(panel_rect.width());
                        ui.set_min_height(panel_rect.height());
                        add_contents(ui, Presentation::Overlay)
                    })
                    .inner
            })
            .inner;

        let escaped = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape));
        (inner, backdrop_clicked || escaped)
    }
}

/// Small icon button that toggles the sidebar.
pub struct SidebarTrigger {
    icon: WidgetText,
}

impl Default for SidebarTrigger {
    fn default() -> Self {
        Self::new("☰")
    }
}

impl SidebarTrigger {
    pub fn new(icon: impl Into<WidgetText>) -> Self {
        Self { icon: icon.into() }
    }

    pub fn show(self, ui: &mut Ui, handle: &SidebarHandle) -> Result<Response, SidebarError> {
        let shortcut = handle.with(|c| c.shortcut())?;
        let hover = format!("Toggle Sidebar ({})", ui.ctx().format_shortcut(&shortcut));
        let response = ui
            .add(Button::new(self.icon).frame(false))
            .on_hover_text(hover);
        if response.clicked() {
            handle.toggle()?;
        }
        Ok(response)
    }
}

/// Thin click strip along the panel edge that toggles the sidebar.
pub struct SidebarRail;

impl SidebarRail {
    pub fn show(ui: &mut Ui, handle: &SidebarHandle) -> Result<Response, SidebarError> {
        let collapsed = handle.state()? == PanelLabel::Collapsed;
        let (rect, response) =
            ui.allocate_exact_size(vec2(RAIL_WIDTH, ui.available_height()), Sense::click());
        let response = response.on_hover_cursor(if collapsed {
            CursorIcon::ResizeEast
        } else {
            CursorIcon::ResizeWest
        });
        if response.hovered() {
            let stroke = Stroke::new(2.0, ui.visuals().widgets.hovered.bg_stroke.color);
            ui.painter().vline(rect.center().x, rect.y_range(), stroke);
        }
        if response.clicked() {
            handle.toggle()?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SidebarConfig;
    use crate::persist::MemoryStore;
    use egui::{Event, RawInput};

    fn frame(ctx: &Context, input: RawInput, handle: &SidebarHandle) -> Option<Presentation> {
        let mut shown = None;
        let _ = ctx.run(input, |ctx| {
            handle.mount(ctx).unwrap();
            handle.begin_frame(ctx).unwrap();
            shown = SidebarView::new("sidebar")
                .show(ctx, handle, |_ui, presentation| presentation)
                .unwrap();
        });
        shown
    }

    fn sized(width: f32) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(egui::Pos2::ZERO, vec2(width, 800.0))),
            ..Default::default()
        }
    }

    #[test]
    fn desktop_presentation_follows_collapsible() {
        let ctx = Context::default();
        let offcanvas = SidebarHandle::initialize(SidebarConfig::default(), MemoryStore::new());
        assert_eq!(
            frame(&ctx, sized(1280.0), &offcanvas),
            Some(Presentation::Expanded)
        );
        offcanvas.close().unwrap();
        assert_eq!(frame(&ctx, sized(1280.0), &offcanvas), None);

        let icon = SidebarHandle::initialize(
            SidebarConfig::default()
                .default_open(false)
                .collapsible(Collapsible::Icon),
            MemoryStore::new(),
        );
        assert_eq!(frame(&ctx, sized(1280.0), &icon), Some(Presentation::Icon));
    }

    #[test]
    fn overlay_dismisses_on_escape() {
        let ctx = Context::default();
        let handle = SidebarHandle::initialize(SidebarConfig::default(), MemoryStore::new());
        assert_eq!(frame(&ctx, sized(500.0), &handle), None);

        handle.set_mobile_open(true).unwrap();
        assert_eq!(
            frame(&ctx, sized(500.0), &handle),
            Some(Presentation::Overlay)
        );
        assert!(handle.mobile_open().unwrap());

        let mut input = sized(500.0);
        input.events.push(Event::Key {
            key: Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        });
        frame(&ctx, input, &handle);
        assert!(!handle.mobile_open().unwrap());
        assert!(handle.panel_state().unwrap().desktop_open);
    }

    #[test]
    fn static_panel_ignores_state() {
        let ctx = Context::default();
        let handle = SidebarHandle::initialize(
            SidebarConfig::default()
                .default_open(false)
                .collapsible(Collapsible::None),
            MemoryStore::new(),
        );
        assert_eq!(
            frame(&ctx, sized(1280.0), &handle),
            Some(Presentation::Static)
        );
    }
}
