pub mod ballistics;
pub mod config;
pub mod entry;
pub mod flight;
pub mod gravity;
pub mod launcher;
pub mod plot;
pub mod range;
pub mod session;
pub mod window;
