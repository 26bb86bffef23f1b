//! # missive-settings
//!
//! The single persistent slot Missive keeps between sessions: a
//! `{theme, profile}` JSON blob in the platform data directory.  Read once
//! at startup, written on every profile or theme change.  Everything else
//! the application shows lives in the in-memory store and dies with the
//! process.

pub mod slot;
pub mod theme;

mod error;

pub use error::{Result, SettingsError};
pub use slot::{Settings, SettingsSlot};
pub use theme::{BorderRadius, FontSize, Theme, ThemeMode};
