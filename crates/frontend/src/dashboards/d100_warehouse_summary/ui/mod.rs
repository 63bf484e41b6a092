pub mod dashboard;

pub use dashboard::{init_dashboard, render_dashboard};
