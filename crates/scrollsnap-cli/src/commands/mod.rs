pub mod config;
pub mod overlap;
pub mod scan;
pub mod shift;
