pub mod d100_warehouse_summary;
