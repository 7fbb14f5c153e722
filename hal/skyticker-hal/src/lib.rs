//! Skyticker Hardware Abstraction Layer
//!
//! Traits that chip-specific HALs implement so the firmware's storage and
//! button handling do not name a particular MCU.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (skyticker-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  skyticker-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ skyticker-hal-rp2040│
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`button::ButtonLine`] - Brightness button state
//! - [`flash::FlashStorage`] - Read access to provisioned config items
//!
//! [`debounce::Debouncer`] is a board-agnostic press filter over
//! [`button::ButtonLine`]s.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod debounce;
pub mod flash;

pub use button::ButtonLine;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use flash::{FlashError, FlashStorage, StorageKey};
