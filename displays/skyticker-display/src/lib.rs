//! Dashboard renderer for the Skyticker weather display
//!
//! This crate provides:
//! - [`Dashboard`], the core [`Renderer`](skyticker_core::traits::Renderer)
//!   for a 320x170 RGB565 panel, drawing onto any `embedded-graphics`
//!   `DrawTarget`
//! - [`TickerStrip`], an off-screen buffer for the scrolling message so the
//!   strip is pushed to the panel in one transfer
//! - [`WeatherIcon`], condition pictures drawn from primitives
//! - The grayscale palette and fixed layout positions
//!
//! # Layout
//!
//! ```text
//! ┌────────────────┬──────────────────────────────────┐
//! │ WEATHER        │ sunrise: 06:58:12          (ic) │
//! │                │ ┌FEELS─┐ ┌CLOUDS┐ ┌VISIBIL.┐      │
//! │   21.5 °C      │ ┌HUMID.┐ ┌PRESS.┐ ┌WIND──┐        │
//! │ CITY: Gatineau │ CURRENT CONDITIONS          3 ●  │
//! │ 14:03  [07]    │ [ scrolling message strip ]      │
//! └────────────────┴──────────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dashboard;
pub mod icon;
pub mod layout;
pub mod palette;
pub mod strip;

pub use dashboard::Dashboard;
pub use icon::WeatherIcon;
pub use strip::TickerStrip;
