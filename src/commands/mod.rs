//! CLI commands for ebbnote

pub mod dispatch;
pub mod due;
pub mod entry;
pub mod export;
pub mod html;
pub mod new;
pub mod push;
pub mod shell;
