use crate::app::AiFusion;
use crate::consts::{APP_TITLE, REPOSITORY_URL};
use crate::errors::{error_toast, AppError};
use egui::{Button, RichText};
use egui_phosphor::regular::SIDEBAR_SIMPLE;
use egui_sidebar::SidebarTrigger;
use egui_toast::Toasts;
use tracing::error;

const BTN_WIDTH: f32 = 200.0;

impl AiFusion {
    pub fn header(&mut self, ui: &mut egui::Ui, toasts: &mut Toasts) {
        egui::menu::bar(ui, |ui| {
            if let Err(err) =
                SidebarTrigger::new(RichText::new(SIDEBAR_SIMPLE).size(18.0)).show(ui, &self.sidebar)
            {
                error!("sidebar trigger failed: {err}");
                toasts.add(error_toast(err.to_string()));
            }
            ui.separator();
            // View
            self.view_menu(ui, toasts);
            // Help
            help_menu(ui, toasts);
        });
    }

    fn view_menu(&mut self, ui: &mut egui::Ui, toasts: &mut Toasts) {
        ui.menu_button("View", |ui| {
            let shortcut = ui.ctx().format_shortcut(&egui_sidebar::SIDEBAR_KEYBOARD_SHORTCUT);
            let toggle_btn = Button::new("Toggle Sidebar")
                .min_size((BTN_WIDTH, 0.).into())
                .shortcut_text(shortcut);
            if ui.add(toggle_btn).clicked() {
                if let Err(err) = self.sidebar.toggle() {
                    toasts.add(error_toast(err.to_string()));
                }
                ui.close();
            }
            ui.separator();
            ui.label(
                RichText::new(format!("Sidebar: {}", self.sidebar_label()))
                    .small()
                    .weak(),
            );
        });
    }

    fn sidebar_label(&self) -> String {
        match self.sidebar.panel_state() {
            Ok(state) if state.is_narrow_viewport => {
                if state.mobile_open {
                    "overlay open".to_string()
                } else {
                    "overlay closed".to_string()
                }
            }
            Ok(state) => state.label().to_string(),
            Err(err) => err.to_string(),
        }
    }
}

fn help_menu(ui: &mut egui::Ui, toasts: &mut Toasts) {
    ui.menu_button("Help", |ui| {
        let about_btn = Button::new(format!("About {APP_TITLE}")).min_size((BTN_WIDTH, 0.).into());
        if ui.add(about_btn).clicked() {
            if let Err(err) = open_repository() {
                error!("opening page {REPOSITORY_URL} error: {err}");
                toasts.add(error_toast(err.to_string()));
            }
            ui.close();
        }
    });
}

fn open_repository() -> Result<(), AppError> {
    if REPOSITORY_URL.is_empty() {
        return Err(AppError::Plain("no repository url configured".into()));
    }
    open::that(REPOSITORY_URL)?;
    Ok(())
}
