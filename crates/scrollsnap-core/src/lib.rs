pub mod align;
pub mod cancel;
pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod session;
