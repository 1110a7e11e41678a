//! Leptos component hosting the flower field.
//!
//! Renders a fixed overlay that ignores pointer input and, once it is mounted,
//! builds a [`FieldController`] on it and wires up the page listeners.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlElement;

use super::config::FieldConfig;
use super::controller::FieldController;

/// Ambient floating flowers over the whole viewport.
///
/// Tap or click anywhere to scatter nearby flowers. Pass `config` to override
/// the defaults (usually loaded from the page, see `load_field_config`).
#[component]
pub fn FlowerField(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let layer_ref = NodeRef::<leptos::html::Div>::new();
	let controller: Rc<RefCell<Option<FieldController>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(layer) = layer_ref.get() else {
			return;
		};
		if controller.borrow().is_some() {
			return;
		}
		let layer: HtmlElement = layer.into();

		let started = FieldController::new(layer, config.clone()).and_then(|c| {
			c.bootstrap()?;
			Ok(c)
		});
		match started {
			Ok(c) => *controller.borrow_mut() = Some(c),
			Err(e) => warn!("petal-drift: flower field disabled: {}", e),
		}
	});

	view! {
		<div
			node_ref=layer_ref
			class="flower-field"
			aria-hidden="true"
			style="position: fixed; inset: 0; pointer-events: none; overflow: hidden;"
		/>
	}
}
