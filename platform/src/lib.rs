//! Win32 side of the program: the window, its message pump and the blit.
#![cfg(windows)]

pub mod debug;
pub mod present;
pub mod time;
pub mod window;

pub use window::{Window, WindowConfig, WindowCreationError};
