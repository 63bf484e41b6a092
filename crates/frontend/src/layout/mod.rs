pub mod left;
pub mod tabs;

use crate::layout::left::init_sidebar;
use crate::layout::tabs::init_tabs;

/// Раскладка страницы: сайдбар и вкладки.
///
/// ```text
/// +----------+-----------------------------+
/// | .sidebar |        .main-content        |
/// | (active  |  margin-left: 280px / 0     |
/// | на моб.) |                             |
/// +----------+-----------------------------+
/// ```
pub fn init_layout() {
    init_sidebar();
    init_tabs();
}
