use crate::app::AiFusion;
use crate::errors::{error_toast, AppError};
use crate::models::AiModel;
use egui::{Button, ComboBox, Layout, RichText, ScrollArea};
use egui_phosphor::regular::{CHAT_CIRCLE, LOCK, STAR};
use egui_toast::Toasts;
use tracing::{debug, error};

const ENABLED_PANE_WIDTH: f32 = 400.0;
const DISABLED_PANE_WIDTH: f32 = 100.0;
const PANE_HEADER_HEIGHT: f32 = 50.0;

enum PaneAction {
    Enable(bool),
    Select(String),
}

impl AiFusion {
    pub fn model_board(&mut self, ui: &mut egui::Ui, toasts: &mut Toasts) {
        let mut actions: Vec<(&'static str, PaneAction)> = vec![];
        let height = ui.available_height();

        ScrollArea::horizontal()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    for model in self.board.models() {
                        let width = if model.enable {
                            ENABLED_PANE_WIDTH.max(ui.available_width() / 4.0)
                        } else {
                            DISABLED_PANE_WIDTH
                        };
                        let selected = self.board.selected(model.model).unwrap_or_default();
                        ui.allocate_ui((width, height).into(), |ui| {
                            ui.set_min_size((width, height).into());
                            if let Some(action) = model_pane(ui, model, selected) {
                                actions.push((model.model, action));
                            }
                        });
                        ui.separator();
                    }
                });
            });

        for (model, action) in actions {
            if let Err(err) = self.apply_pane_action(model, action) {
                error!("model pane action on {model} failed: {err}");
                toasts.add(error_toast(err.to_string()));
            }
        }
    }

    fn apply_pane_action(&mut self, model: &str, action: PaneAction) -> Result<(), AppError> {
        match action {
            PaneAction::Enable(enable) => {
                self.board.set_enabled(model, enable)?;
                debug!(model, enable, "model pane toggled");
            }
            PaneAction::Select(id) => {
                self.board.select_sub_model(model, &id)?;
                self.db.save_model_pref(model, &id)?;
            }
        }
        Ok(())
    }
}

fn model_pane(ui: &mut egui::Ui, model: &AiModel, selected: &str) -> Option<PaneAction> {
    let mut action = None;

    ui.allocate_ui_with_layout(
        (ui.available_width(), PANE_HEADER_HEIGHT).into(),
        Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.label(RichText::new(model.icon).size(22.0))
                .on_hover_text(model.model);
            if model.enable {
                if let Some(id) = sub_model_picker(ui, model, selected) {
                    action = Some(PaneAction::Select(id));
                }
            }
            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                if model.enable {
                    let mut enable = true;
                    if ui.checkbox(&mut enable, "").changed() {
                        action = Some(PaneAction::Enable(enable));
                    }
                } else if ui
                    .add(Button::new(RichText::new(CHAT_CIRCLE).size(20.0)).frame(false))
                    .on_hover_text(format!("Enable {}", model.model))
                    .clicked()
                {
                    action = Some(PaneAction::Enable(true));
                }
            });
        },
    );
    ui.separator();

    if model.enable && model.premium {
        ui.centered_and_justified(|ui| {
            ui.add(Button::new(format!("{LOCK} Upgrade to Unlock")));
        });
    }

    action
}

fn sub_model_picker(ui: &mut egui::Ui, model: &AiModel, selected: &str) -> Option<String> {
    let mut choice = selected.to_string();
    let selected_name = model
        .sub_model(selected)
        .map(|m| m.name)
        .unwrap_or("Premium only");

    ui.add_enabled_ui(!model.premium, |ui| {
        ComboBox::from_id_salt(("sub_model", model.model))
            .width(180.0)
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                ui.label(RichText::new("Free").small().strong());
                for sub in model.free_sub_models() {
                    ui.selectable_value(&mut choice, sub.id.to_string(), sub.name);
                }
                ui.separator();
                ui.label(RichText::new(format!("{STAR} Premium")).small().strong());
                for sub in model.premium_sub_models() {
                    ui.add_enabled_ui(false, |ui| {
                        let _ = ui.selectable_label(false, format!("{} {LOCK}", sub.name));
                    });
                }
            });
    });

    (choice != selected).then_some(choice)
}
