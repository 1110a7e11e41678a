//! UI components.

pub mod flower_field;
