use crate::consts::{
    APP_TITLE, DATA_DIR, DB_FILE, DB_PATH_ENV, DEFAULT_USER_EMAIL, DEFAULT_USER_NAME,
    SIDEBAR_MODE_ENV, USER_EMAIL_ENV, USER_NAME_ENV,
};
use crate::db::{DbConn, SqliteStore};
use crate::errors::{error_toast, AppError};
use crate::models::{default_models, ModelBoard};
use crate::ui::chat_input::ChatDraft;
use crate::ui::usage::UsageCredit;
use crate::user::UserProfile;
use eframe::{egui, NativeOptions};
use egui::Align2;
use egui_sidebar::{Collapsible, SidebarConfig, SidebarHandle, SidebarView};
use egui_toast::Toasts;
use homedir::my_home;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub db_path: PathBuf,
    pub user_name: String,
    pub user_email: String,
    pub collapsible: Collapsible,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_FILE),
            user_name: DEFAULT_USER_NAME.to_string(),
            user_email: DEFAULT_USER_EMAIL.to_string(),
            collapsible: Collapsible::Icon,
        }
    }
}

impl AppOptions {
    pub fn from_env() -> Result<Self, AppError> {
        let mut opts = Self::default();
        match env::var_os(DB_PATH_ENV) {
            Some(path) => opts.db_path = PathBuf::from(path),
            None => {
                if let Some(home) = my_home()? {
                    let dir = home.join(DATA_DIR);
                    std::fs::create_dir_all(&dir)?;
                    opts.db_path = dir.join(DB_FILE);
                }
            }
        }
        if let Ok(name) = env::var(USER_NAME_ENV) {
            opts.user_name = name;
        }
        if let Ok(email) = env::var(USER_EMAIL_ENV) {
            opts.user_email = email;
        }
        if let Ok(mode) = env::var(SIDEBAR_MODE_ENV) {
            match parse_collapsible(&mode) {
                Some(collapsible) => opts.collapsible = collapsible,
                None => error!("unknown {SIDEBAR_MODE_ENV} value: {mode}"),
            }
        }
        Ok(opts)
    }
}

pub fn parse_collapsible(value: &str) -> Option<Collapsible> {
    match value.trim().to_ascii_lowercase().as_str() {
        "offcanvas" => Some(Collapsible::Offcanvas),
        "icon" => Some(Collapsible::Icon),
        "none" => Some(Collapsible::None),
        _ => None,
    }
}

pub struct AiFusion {
    pub sidebar: SidebarHandle,
    pub board: ModelBoard,
    pub chat: ChatDraft,
    pub usage: UsageCredit,
    pub profile: UserProfile,
    pub db: DbConn,
    pub opts: AppOptions,
}

impl AiFusion {
    pub fn new(ctx: &egui::Context, opts: AppOptions) -> Result<Self, AppError> {
        let db = DbConn::open(&opts.db_path)?;
        info!("opened database at {}", opts.db_path.display());

        let profile = UserProfile::free(&opts.user_name, &opts.user_email);
        db.ensure_user(&profile)?;
        let profile = db.find_user(&profile.email)?.unwrap_or(profile);

        let default_open = db.read_sidebar_state()?.unwrap_or(true);
        let sidebar = SidebarHandle::initialize(
            SidebarConfig::default()
                .default_open(default_open)
                .collapsible(opts.collapsible),
            SqliteStore::new(db.clone()),
        );
        sidebar.mount(ctx)?;

        let board = ModelBoard::new(default_models()).with_preferences(&db.load_model_prefs()?);

        Ok(Self {
            sidebar,
            board,
            chat: ChatDraft::default(),
            usage: UsageCredit::from_profile(&profile),
            profile,
            db,
            opts,
        })
    }

    pub fn start(options: NativeOptions) -> eframe::Result<()> {
        eframe::run_native(
            APP_TITLE,
            options,
            Box::new(|cc| {
                catppuccin_egui::set_theme(&cc.egui_ctx, catppuccin_egui::FRAPPE);
                set_font(&cc.egui_ctx);
                cc.egui_ctx
                    .options_mut(|opt| opt.zoom_with_keyboard = false);
                let opts = AppOptions::from_env()?;
                Ok(Box::new(AiFusion::new(&cc.egui_ctx, opts)?))
            }),
        )
    }
}

impl eframe::App for AiFusion {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut toasts = Toasts::new()
            .anchor(Align2::RIGHT_BOTTOM, (-10.0, -10.0))
            .direction(egui::Direction::BottomUp);

        if let Err(err) = self.sidebar.begin_frame(ctx) {
            error!("sidebar input failed: {err}");
        }

        egui::TopBottomPanel::top("main_top_panel").show(ctx, |ui| {
            self.header(ui, &mut toasts);
        });

        let sidebar = self.sidebar.clone();
        let shown = SidebarView::new("app_sidebar").show(ctx, &sidebar, |ui, presentation| {
            self.app_sidebar(ui, presentation, &mut toasts);
        });
        if let Err(err) = shown {
            toasts.add(error_toast(err.to_string()));
        }

        egui::TopBottomPanel::bottom("chat_input_panel").show(ctx, |ui| {
            self.chat_input(ui, &mut toasts);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.model_board(ui, &mut toasts);
        });

        toasts.show(ctx);
    }
}

impl Drop for AiFusion {
    fn drop(&mut self) {
        if let Err(err) = self.sidebar.unmount() {
            error!("failed to unmount sidebar: {err}");
        }
    }
}

fn set_font(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sidebar_modes() {
        assert_eq!(parse_collapsible("icon"), Some(Collapsible::Icon));
        assert_eq!(parse_collapsible(" OffCanvas "), Some(Collapsible::Offcanvas));
        assert_eq!(parse_collapsible("none"), Some(Collapsible::None));
        assert_eq!(parse_collapsible("floating"), None);
    }

    #[test]
    fn new_app_reads_persisted_sidebar_state() {
        let dir = std::env::temp_dir().join(format!("aifusion-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let opts = AppOptions {
            db_path: dir.join("app.sqlite"),
            ..Default::default()
        };
        let ctx = egui::Context::default();

        {
            let app = AiFusion::new(&ctx, opts.clone()).unwrap();
            assert!(app.sidebar.state().unwrap().is_expanded());
            app.sidebar.toggle().unwrap();
        }

        let app = AiFusion::new(&ctx, opts).unwrap();
        assert!(!app.sidebar.state().unwrap().is_expanded());
        assert_eq!(app.profile.email, DEFAULT_USER_EMAIL);
        drop(app);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
