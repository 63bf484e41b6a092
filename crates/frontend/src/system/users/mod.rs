pub mod api;
pub mod ui;

pub use ui::mount_users_page;
