//! Snapshot of the host conditions the capacity policy depends on.

use js_sys::Reflect;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Connection hints from `navigator.connection`, when the browser exposes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkHint {
	pub save_data: bool,
	/// `effectiveType`, e.g. `"4g"` or `"slow-2g"`.
	pub effective_type: Option<String>,
}

/// Everything the policy reads from the page, captured at one instant.
///
/// Probed fresh on every policy decision so viewport, visibility and
/// preference changes take effect without any cache to invalidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
	/// `window.innerWidth` in CSS pixels.
	pub viewport_width: f64,
	pub touch: bool,
	pub reduced_motion: bool,
	pub visible: bool,
	pub network: NetworkHint,
}

impl Default for Environment {
	fn default() -> Self {
		Self {
			viewport_width: 1024.0,
			touch: false,
			reduced_motion: false,
			visible: true,
			network: NetworkHint::default(),
		}
	}
}

impl Environment {
	pub fn probe(window: &Window) -> Self {
		Self {
			viewport_width: viewport_width(window),
			touch: touch_capable(window),
			reduced_motion: prefers_reduced_motion(window),
			visible: page_visible(window),
			network: network_hint(window),
		}
	}
}

fn viewport_width(window: &Window) -> f64 {
	window
		.inner_width()
		.ok()
		.and_then(|w| w.as_f64())
		.unwrap_or(0.0)
}

fn touch_capable(window: &Window) -> bool {
	Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
		|| window.navigator().max_touch_points() > 0
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}

fn page_visible(window: &Window) -> bool {
	window.document().is_some_and(|doc| !doc.hidden())
}

/// Network Information is non-standard; any missing piece reads as "no hint".
fn network_hint(window: &Window) -> NetworkHint {
	let navigator = window.navigator();
	let connection = match Reflect::get(&navigator, &JsValue::from_str("connection")) {
		Ok(c) if c.is_object() => c,
		Ok(_) => return NetworkHint::default(),
		Err(e) => {
			debug!("petal-drift: navigator.connection unreadable: {:?}", e);
			return NetworkHint::default();
		}
	};

	let save_data = Reflect::get(&connection, &JsValue::from_str("saveData"))
		.ok()
		.and_then(|v| v.as_bool())
		.unwrap_or(false);
	let effective_type = Reflect::get(&connection, &JsValue::from_str("effectiveType"))
		.ok()
		.and_then(|v| v.as_string());

	NetworkHint {
		save_data,
		effective_type,
	}
}
