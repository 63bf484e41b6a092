pub mod sidebar;

pub use sidebar::{init_sidebar, toggle_sidebar, SidebarLayout, SidebarView};
