use crate::models::ModelError;
use egui::WidgetText;
use egui_sidebar::SidebarError;
use egui_toast::{Toast, ToastKind, ToastOptions};
use homedir::GetHomeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Plain(String),
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Sidebar(#[from] SidebarError),
    #[error("{0}")]
    Validation(#[from] garde::Report),
    #[error("{0}")]
    Model(#[from] ModelError),
    #[error("{0}")]
    GetHome(#[from] GetHomeError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub fn error_toast<E: Into<WidgetText>>(err: E) -> Toast {
    Toast {
        text: err.into(),
        kind: ToastKind::Error,
        options: ToastOptions::default()
            .duration_in_seconds(5.0)
            .show_progress(true),
        ..Default::default()
    }
}

pub fn info_toast<E: Into<WidgetText>>(msg: E) -> Toast {
    Toast {
        text: msg.into(),
        kind: ToastKind::Info,
        options: ToastOptions::default()
            .duration_in_seconds(3.0)
            .show_progress(false),
        ..Default::default()
    }
}
