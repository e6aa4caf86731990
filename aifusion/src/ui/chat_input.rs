use crate::app::AiFusion;
use crate::errors::info_toast;
use egui::{Button, Key, Layout, RichText, TextEdit};
use egui_phosphor::regular::{MICROPHONE, PAPERCLIP, PAPER_PLANE_RIGHT};
use egui_toast::Toasts;
use tracing::info;

const INPUT_MAX_WIDTH: f32 = 672.0;
const ICON_SIZE: f32 = 18.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatDraft {
    pub text: String,
}

impl ChatDraft {
    /// Trimmed, non-empty draft text. Clears the draft when it returns `Some`.
    pub fn take_submission(&mut self) -> Option<String> {
        let message = self.text.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();
        self.text.clear();
        Some(message)
    }
}

impl AiFusion {
    pub fn chat_input(&mut self, ui: &mut egui::Ui, toasts: &mut Toasts) {
        let width = ui.available_width().min(INPUT_MAX_WIDTH);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            egui::Frame::group(ui.style())
                .corner_radius(12.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(width);
                    let edit = ui.add(
                        TextEdit::singleline(&mut self.chat.text)
                            .hint_text("Ask me anything...")
                            .frame(false)
                            .desired_width(f32::INFINITY),
                    );
                    let mut send = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.add(Button::new(RichText::new(PAPERCLIP).size(ICON_SIZE)).frame(false))
                            .on_hover_text("Attach");
                        ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                            send |= ui
                                .add(Button::new(RichText::new(PAPER_PLANE_RIGHT).size(ICON_SIZE)))
                                .on_hover_text("Send")
                                .clicked();
                            ui.add(Button::new(RichText::new(MICROPHONE).size(ICON_SIZE)).frame(false))
                                .on_hover_text("Voice");
                        });
                    });

                    if send {
                        self.submit_chat(toasts);
                    }
                });
        });
        ui.add_space(8.0);
    }

    fn submit_chat(&mut self, toasts: &mut Toasts) {
        let Some(message) = self.chat.take_submission() else {
            return;
        };
        let targets: Vec<&str> = self
            .board
            .enabled()
            .filter_map(|m| self.board.selected(m.model))
            .collect();
        info!(chars = message.len(), targets = ?targets, "chat message submitted");
        toasts.add(info_toast(format!(
            "Message ready for {} model(s)",
            targets.len()
        )));
    }
}
