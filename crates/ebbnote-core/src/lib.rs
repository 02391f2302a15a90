//! Ebbnote Core Library
//!
//! Note inventory, forgetting-curve review scheduling and export generation
//! for the ebbnote CLI, plus the external collaborators (git, editor, HTML
//! rendering) it drives.

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod git;
pub mod html;
pub mod logging;
pub mod name;
pub mod note;
pub mod schedule;
pub mod store;
