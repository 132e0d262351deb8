pub mod cancel_scan;
pub mod scan_food;
pub mod scan_label;
