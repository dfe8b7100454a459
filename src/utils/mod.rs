pub mod dirs;
pub mod progress;
