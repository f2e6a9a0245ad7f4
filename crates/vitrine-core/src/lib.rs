//! Vitrine Core - Foundation types for the Vitrine window-effects loader.
//!
//! This crate provides:
//! - Platform identification and module applicability selectors
//! - CSS custom property value parsing
//! - Capability traits for the host desktop shell (windows, renderer
//!   contexts, native effect drivers)
//! - Home directory scaffolding for user-level state

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod css;
pub mod dirs;
pub mod host;
pub mod platform;

pub use css::CssValue;
pub use dirs::VitrineHome;
pub use host::{
    EffectDriver, EffectField, HostError, HostResult, HostShell, HostWindow, LogLevel,
    RemoteRequest, RendererContext, WindowId,
};
pub use platform::{Platform, PlatformSelector};
