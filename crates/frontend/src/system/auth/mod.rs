pub mod forms;

pub use forms::{init_auth_forms, init_focus_tracking};
