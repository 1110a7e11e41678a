//! petal-drift: ambient floating emoji flowers for a web page.
//!
//! This crate provides a WASM component that spawns rising, swaying emoji
//! flowers with density adapted to the device, and scatters them away from
//! taps and clicks.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::flower_field::{FieldConfig, FieldError, FlowerField};

/// Id of the optional JSON script element holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "flower-field-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("petal-drift: logging initialized");
}

/// Load config overrides from a script element with id="flower-field-config".
/// Expected format: a partial [`FieldConfig`] as JSON.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
		debug!("petal-drift: no #{} element, using defaults", CONFIG_ELEMENT_ID);
		return None;
	};
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("petal-drift: loaded config overrides");
			Some(config)
		}
		Err(e) => {
			warn!("petal-drift: ignoring config overrides: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads config overrides from the DOM and mounts the flower field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Title text="petal drift" />
		<FlowerField config=config />
	}
}
