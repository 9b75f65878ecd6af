pub mod terminal_guard;
pub mod wizard;

pub use terminal_guard::TerminalGuard;
pub use wizard::centered_rect;
