//! Collaborator traits
//!
//! These traits define the interface between the application logic and
//! network, clock, display and input implementations.

pub mod backlight;
pub mod clock;
pub mod input;
pub mod render;
pub mod source;

pub use backlight::Backlight;
pub use clock::{ClockSource, SyncError};
pub use input::{Buttons, InputSource};
pub use render::{Frame, RenderError, Renderer};
pub use source::{DataSource, FetchError};
