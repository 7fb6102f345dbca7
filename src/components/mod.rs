pub mod app;
pub mod diagnostics;
pub mod directory;
pub mod header;
pub mod master_detail;
pub mod zoom_viewer;
