//! Shell state machines, independent of the UI layer.

pub mod cart;
pub mod clock;
pub mod search_dialog;
pub mod taskbar;
pub mod timer;
