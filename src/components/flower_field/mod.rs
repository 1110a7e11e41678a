//! Floating flower field.
//!
//! Emoji flowers rise through the viewport, swaying as they go:
//! - Density adapts to viewport width, touch input and reduced-motion
//! - Spawning pauses while the page is hidden and slows on low-data connections
//! - A tap or click leaves a burst and pushes nearby flowers outward
//!
//! # Example
//!
//! ```ignore
//! use petal_drift::FlowerField;
//!
//! view! { <FlowerField /> }
//! ```

mod component;
pub mod config;
mod controller;
mod dom;
mod environment;
mod error;
mod flower;
mod policy;
mod random;
mod repel;
mod spawner;
mod state;
pub mod theme;

pub use component::FlowerField;
pub use config::FieldConfig;
pub use error::FieldError;
pub use random::Range;
