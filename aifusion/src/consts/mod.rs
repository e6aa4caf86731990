pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");
pub const APP_TITLE: &str = "AI Fusion";

pub const DB_PATH_ENV: &str = "AIFUSION_DB";
pub const USER_NAME_ENV: &str = "AIFUSION_USER_NAME";
pub const USER_EMAIL_ENV: &str = "AIFUSION_USER_EMAIL";
pub const SIDEBAR_MODE_ENV: &str = "AIFUSION_SIDEBAR";

pub const DATA_DIR: &str = ".aifusion";
pub const DB_FILE: &str = "aifusion.sqlite";

pub const DEFAULT_USER_NAME: &str = "Local User";
pub const DEFAULT_USER_EMAIL: &str = "local@aifusion.dev";

// free plan quota
pub const FREE_PLAN: &str = "Free";
pub const FREE_PLAN_MESSAGES: u32 = 5;
pub const FREE_PLAN_CREDITS: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_link_comes_from_manifest() {
        assert!(REPOSITORY_URL.starts_with("https://"));
        assert_eq!(PKG_NAME, "aifusion");
    }
}
