//! Headless swipe-to-dismiss demo.

pub mod card;
pub mod shell;

pub use card::Card;
pub use shell::DemoShell;
