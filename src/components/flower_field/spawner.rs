//! The single repeating spawn timer.

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::FieldError;

/// Owns the interval handle and the callback it invokes.
///
/// Replacing the timer always clears the previous one first, so at most one
/// interval is live.
#[derive(Default)]
pub struct Spawner {
	handle: Option<i32>,
	tick: Option<Closure<dyn FnMut()>>,
	period_ms: Option<u32>,
}

impl Spawner {
	pub fn period_ms(&self) -> Option<u32> {
		self.period_ms
	}

	pub fn cancel(&mut self, window: &Window) {
		if let Some(handle) = self.handle.take() {
			window.clear_interval_with_handle(handle);
		}
		self.tick = None;
		self.period_ms = None;
	}

	/// Clear any running timer and start `tick` every `period_ms`.
	pub fn replace(
		&mut self,
		window: &Window,
		period_ms: u32,
		tick: Closure<dyn FnMut()>,
	) -> Result<(), FieldError> {
		self.cancel(window);
		let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
			tick.as_ref().unchecked_ref(),
			period_ms.min(i32::MAX as u32) as i32,
		)?;
		self.handle = Some(handle);
		self.tick = Some(tick);
		self.period_ms = Some(period_ms);
		Ok(())
	}
}
