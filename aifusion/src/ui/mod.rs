mod app_sidebar;
pub mod chat_input;
mod header;
mod model_board;
pub mod usage;
