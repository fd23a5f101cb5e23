pub mod d400_dashboard;
