use crate::app::AiFusion;
use crate::consts::APP_TITLE;
use crate::errors::info_toast;
use egui::{Button, Layout, RichText};
use egui_phosphor::regular::{CHAT_CIRCLE, PLUS, ROBOT, SIGN_IN};
use egui_sidebar::{Presentation, SidebarRail};
use egui_theme_switch::global_theme_switch;
use egui_toast::Toasts;
use tracing::error;

impl AiFusion {
    pub fn app_sidebar(&mut self, ui: &mut egui::Ui, presentation: Presentation, toasts: &mut Toasts) {
        if presentation.is_icon_only() {
            self.sidebar_icons(ui, toasts);
            return;
        }

        ui.horizontal(|ui| {
            ui.label(RichText::new(ROBOT).size(28.0));
            ui.heading(RichText::new(APP_TITLE).strong());
            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                global_theme_switch(ui);
            });
        });
        ui.add_space(12.0);
        let new_chat = Button::new(format!("{PLUS} New Chat")).min_size((ui.available_width(), 28.0).into());
        if ui.add(new_chat).clicked() {
            self.new_chat(toasts);
        }
        ui.add_space(16.0);
        ui.separator();

        ui.label(RichText::new("Chat").strong().size(20.0));
        ui.label(RichText::new("Sign in to chat with multiple AI Models.").weak());

        ui.with_layout(Layout::bottom_up(egui::Align::Min), |ui| {
            ui.add_space(24.0);
            let sign_in = Button::new(format!("{SIGN_IN} Sign In/Sign Up"))
                .min_size((ui.available_width(), 28.0).into());
            // Authentication lives outside this app; the button is inert.
            ui.add_enabled(false, sign_in)
                .on_disabled_hover_text(format!("Signed in locally as {}", self.profile.email));
            ui.add_space(12.0);
            self.usage.show(ui);
        });

        if presentation == Presentation::Expanded {
            let rail = ui.max_rect();
            let mut rail_ui = ui.new_child(
                egui::UiBuilder::new()
                    .max_rect(egui::Rect::from_min_max(
                        egui::pos2(rail.max.x - 6.0, rail.min.y),
                        rail.max,
                    ))
                    .layout(Layout::top_down(egui::Align::Min)),
            );
            if let Err(err) = SidebarRail::show(&mut rail_ui, &self.sidebar) {
                error!("sidebar rail failed: {err}");
            }
        }
    }

    fn sidebar_icons(&mut self, ui: &mut egui::Ui, toasts: &mut Toasts) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(ROBOT).size(24.0));
            ui.add_space(12.0);
            if ui
                .add(Button::new(RichText::new(PLUS).size(18.0)).frame(false))
                .on_hover_text("New Chat")
                .clicked()
            {
                self.new_chat(toasts);
            }
            ui.add(Button::new(RichText::new(CHAT_CIRCLE).size(18.0)).frame(false))
                .on_hover_text("Chat");
        });
    }

    fn new_chat(&mut self, toasts: &mut Toasts) {
        self.chat.text.clear();
        toasts.add(info_toast("Started a new chat"));
    }
}
