//! Error type for the flower field.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced while wiring the effect to the host page.
///
/// None of these reach the user: the controller logs them and carries on with
/// whatever part of the effect still works.
#[derive(Debug, Error)]
pub enum FieldError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,

	/// The window has no document attached.
	#[error("window has no document")]
	NoDocument,

	/// A browser API call threw.
	#[error("host call failed: {0}")]
	Host(String),

	/// Config parsed but holds unusable values.
	#[error("invalid config: {0}")]
	Config(String),

	/// Config is not valid JSON for [`FieldConfig`](super::FieldConfig).
	#[error("config JSON: {0}")]
	Json(#[from] serde_json::Error),
}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		let text = value.as_string().unwrap_or_else(|| format!("{value:?}"));
		FieldError::Host(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(FieldError::NoWindow.to_string(), "no global window");
		assert_eq!(
			FieldError::Config("flower.rise_secs is inverted".into()).to_string(),
			"invalid config: flower.rise_secs is inverted"
		);
	}

	#[test]
	fn json_errors_convert() {
		let err = serde_json::from_str::<u32>("nope").unwrap_err();
		let field: FieldError = err.into();
		assert!(matches!(field, FieldError::Json(_)));
		assert!(field.to_string().starts_with("config JSON:"));
	}
}
