use crate::user::UserProfile;
use egui::{ProgressBar, RichText, Ui};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCredit {
    pub plan: String,
    pub used: u32,
    pub limit: u32,
}

impl UsageCredit {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let limit = crate::consts::FREE_PLAN_MESSAGES;
        Self {
            plan: profile.plan.clone(),
            used: limit.saturating_sub(profile.remaining_msg),
            limit,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.limit == 0 {
            return 1.0;
        }
        (self.used as f32 / self.limit as f32).clamp(0.0, 1.0)
    }

    pub fn label(&self) -> String {
        format!("{}/{} message used.", self.used, self.limit)
    }

    pub fn show(&self, ui: &mut Ui) {
        egui::Frame::group(ui.style())
            .corner_radius(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("{} Plan", self.plan)).strong().size(18.0));
                ui.label(self.label());
                ui.add(ProgressBar::new(self.fraction()).desired_height(6.0));
            });
    }
}
