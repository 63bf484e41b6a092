pub mod chart_js;
pub mod charts;
pub mod data;
pub mod ui;
