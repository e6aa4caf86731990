pub mod app;
pub mod consts;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod user;
