//! Element construction and styling.
//!
//! The stylesheet owns what `flower`, `burst` and `repel` look like and the
//! rise keyframes that consume `--drift` and `--rise-dur`. This module only
//! sets classes, inline geometry and those custom properties.

use log::{trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use super::error::FieldError;
use super::flower::FlowerSpec;
use super::repel::Impulse;

pub const FLOWER_CLASS: &str = "flower";
pub const BURST_CLASS: &str = "burst";
pub const REPEL_CLASS: &str = "repel";

fn glyph_element(document: &Document, class: &str, glyph: &str) -> Result<HtmlElement, FieldError> {
	let el: HtmlElement = document
		.create_element("span")?
		.dyn_into()
		.map_err(|_| FieldError::Host("span is not an HtmlElement".into()))?;
	el.set_class_name(class);
	el.set_text_content(Some(glyph));
	el.set_attribute("aria-hidden", "true")?;
	Ok(el)
}

/// Create a flower from its parameters and attach it under `parent`.
pub fn create_flower(
	document: &Document,
	parent: &Element,
	spec: &FlowerSpec,
) -> Result<HtmlElement, FieldError> {
	let el = glyph_element(document, FLOWER_CLASS, &spec.glyph)?;
	let style = el.style();
	style.set_property("left", &format!("{:.2}vw", spec.left_percent))?;
	style.set_property("font-size", &format!("{:.1}px", spec.font_size_px))?;
	style.set_property("--drift", &format!("{:.1}px", spec.drift_px))?;
	style.set_property("--rise-dur", &format!("{:.2}s", spec.rise_secs))?;
	style.set_property("transform", &rotation(spec.base_rotation_deg))?;
	parent.append_child(&el)?;
	Ok(el)
}

/// Create a burst centered on the pointer position and attach it.
pub fn create_burst(
	document: &Document,
	parent: &Element,
	glyph: &str,
	x: f64,
	y: f64,
) -> Result<HtmlElement, FieldError> {
	let el = glyph_element(document, BURST_CLASS, glyph)?;
	let style = el.style();
	style.set_property("left", &format!("{x:.0}px"))?;
	style.set_property("top", &format!("{y:.0}px"))?;
	parent.append_child(&el)?;
	Ok(el)
}

fn rotation(angle_deg: f64) -> String {
	format!("rotate({angle_deg:.2}deg)")
}

pub fn set_rotation(el: &HtmlElement, angle_deg: f64) {
	// Runs every frame for every flower; keep failures out of the console.
	if let Err(e) = el.style().set_property("transform", &rotation(angle_deg)) {
		trace!("petal-drift: sway transform rejected: {:?}", e);
	}
}

pub fn apply_repel(el: &HtmlElement, impulse: &Impulse) -> Result<(), FieldError> {
	el.class_list().add_1(REPEL_CLASS)?;
	let style = el.style();
	style.set_property("transform", &impulse.to_css_transform())?;
	style.set_property("opacity", &impulse.opacity.to_string())?;
	Ok(())
}

pub fn clear_repel(el: &HtmlElement) {
	if let Err(e) = el.class_list().remove_1(REPEL_CLASS) {
		warn!("petal-drift: could not clear repel marker: {:?}", e);
	}
}

/// Center of the element's bounding box in viewport coordinates.
pub fn visual_center(el: &HtmlElement) -> (f64, f64) {
	let rect = el.get_bounding_client_rect();
	(
		rect.left() + rect.width() / 2.0,
		rect.top() + rect.height() / 2.0,
	)
}

/// Run `f` once after `delay_ms`.
pub fn set_timeout<F>(window: &Window, delay_ms: u32, f: F) -> Result<i32, FieldError>
where
	F: FnOnce() + 'static,
{
	let callback = Closure::once_into_js(f);
	let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
		callback.unchecked_ref(),
		delay_ms.min(i32::MAX as u32) as i32,
	)?;
	Ok(handle)
}
