//! RP2040-specific HAL for the weather display firmware
//!
//! Implements the shared `skyticker-hal` traits and the core's input and
//! backlight collaborators on RP2040 peripherals:
//!
//! - Flash storage driver (implements `skyticker_hal::FlashStorage`)
//! - Debounced brightness buttons (implements `InputSource`)
//! - PWM backlight (implements `Backlight`)

#![no_std]

pub mod backlight;
pub mod flash;
pub mod input;

// Re-export shared traits from skyticker-hal for convenience
pub use skyticker_hal::{FlashStorage as FlashStorageTrait, StorageKey};
