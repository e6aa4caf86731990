use crate::errors::AppError;
use crate::user::UserProfile;
use chrono::Local;
use egui_sidebar::{PreferenceCookie, PreferenceStore, SidebarError, SIDEBAR_COOKIE_NAME};
use garde::Validate;
use indexmap::IndexMap;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;
use std::rc::Rc;
use tracing::info;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS preference
    (
        name        TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        path        TEXT NOT NULL DEFAULT '/',
        expires_at  INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS user
    (
        email          TEXT PRIMARY KEY,
        name           TEXT NOT NULL,
        plan           TEXT NOT NULL,
        remaining_msg  INTEGER NOT NULL CHECK (remaining_msg >= 0),
        credits        INTEGER NOT NULL CHECK (credits >= 0),
        create_time    INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS model_pref
    (
        model     TEXT PRIMARY KEY,
        model_id  TEXT NOT NULL
    );";

/// Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct DbConn {
    db: Rc<Connection>,
}

impl DbConn {
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute_batch(SCHEMA)?;
        Ok(Self { db: Rc::new(db) })
    }

    pub fn write_preference(&self, cookie: &PreferenceCookie) -> Result<()> {
        self.write_preference_at(cookie, Local::now().timestamp_millis())
    }

    fn write_preference_at(&self, cookie: &PreferenceCookie, now_millis: i64) -> Result<()> {
        let expires_at = now_millis + (cookie.max_age as i64) * 1000;
        self.db.execute(
            "INSERT INTO preference(name, value, path, expires_at) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(name) DO UPDATE SET value = ?2, path = ?3, expires_at = ?4",
            (&cookie.name, &cookie.value, &cookie.path, expires_at),
        )?;
        Ok(())
    }

    /// Expired rows read as absent.
    pub fn read_preference(&self, name: &str) -> Result<Option<String>> {
        self.read_preference_at(name, Local::now().timestamp_millis())
    }

    fn read_preference_at(&self, name: &str, now_millis: i64) -> Result<Option<String>> {
        self.db
            .query_row(
                "SELECT value FROM preference WHERE name = ?1 AND expires_at > ?2",
                (name, now_millis),
                |row| row.get(0),
            )
            .optional()
    }

    pub fn read_sidebar_state(&self) -> Result<Option<bool>> {
        Ok(self
            .read_preference(SIDEBAR_COOKIE_NAME)?
            .and_then(|value| value.parse().ok()))
    }

    pub fn find_user(&self, email: &str) -> Result<Option<UserProfile>> {
        self.db
            .query_row(
                "SELECT name, email, plan, remaining_msg, credits FROM user WHERE email = ?1",
                (email,),
                |row| {
                    Ok(UserProfile {
                        name: row.get(0)?,
                        email: row.get(1)?,
                        plan: row.get(2)?,
                        remaining_msg: row.get(3)?,
                        credits: row.get(4)?,
                    })
                },
            )
            .optional()
    }

    /// Inserts `profile` unless a record with the same email exists.
    /// Returns `true` when a new record was written.
    pub fn ensure_user(&self, profile: &UserProfile) -> Result<bool, AppError> {
        profile.validate()?;
        if self.find_user(&profile.email)?.is_some() {
            info!("user {} already exists", profile.email);
            return Ok(false);
        }
        let time = Local::now().timestamp_millis();
        self.db.execute(
            "INSERT INTO user(email, name, plan, remaining_msg, credits, create_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &profile.email,
                &profile.name,
                &profile.plan,
                profile.remaining_msg,
                profile.credits,
                time,
            ),
        )?;
        info!("created user record for {}", profile.email);
        Ok(true)
    }

    pub fn load_model_prefs(&self) -> Result<IndexMap<String, String>> {
        let mut stmt = self
            .db
            .prepare("SELECT model, model_id FROM model_pref ORDER BY rowid")?;
        let mut rows = stmt.query(())?;
        let mut prefs = IndexMap::new();
        while let Some(row) = rows.next()? {
            prefs.insert(row.get(0)?, row.get(1)?);
        }
        Ok(prefs)
    }

    pub fn save_model_pref(&self, model: &str, model_id: &str) -> Result<()> {
        self.db.execute(
            "INSERT INTO model_pref(model, model_id) VALUES (?1, ?2) \
                 ON CONFLICT(model) DO UPDATE SET model_id = ?2",
            (model, model_id),
        )?;
        Ok(())
    }
}

/// Sidebar preference shim backed by the `preference` table.
pub struct SqliteStore {
    db: DbConn,
}

impl SqliteStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

impl PreferenceStore for SqliteStore {
    fn write(&mut self, cookie: &PreferenceCookie) -> Result<(), SidebarError> {
        self.db
            .write_preference(cookie)
            .map_err(|err| SidebarError::Persist(Box::new(err)))
    }
}
