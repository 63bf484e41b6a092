pub mod d100_warehouse_summary;

pub use d100_warehouse_summary::ui::init_dashboard;
