//! The field controller: owns all mutable state and drives it from host
//! timers, animation frames and input events.
//!
//! Cloning is cheap; clones share one field. Timer and listener callbacks each
//! hold a clone, which keeps the field alive for the life of the page.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, HtmlElement, MouseEvent, TouchEvent, Window};

use super::config::FieldConfig;
use super::dom;
use super::environment::Environment;
use super::error::FieldError;
use super::policy;
use super::random::{JsRandom, RandomSource};
use super::repel;
use super::spawner::Spawner;
use super::state::FieldState;
use super::theme::FALLBACK_BURST;

struct FieldRuntime {
	state: FieldState<HtmlElement>,
	config: FieldConfig,
	rng: JsRandom,
	document: Document,
	container: HtmlElement,
	animating: bool,
}

#[derive(Clone)]
pub struct FieldController {
	window: Window,
	runtime: Rc<RefCell<FieldRuntime>>,
	frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	spawner: Rc<RefCell<Spawner>>,
}

impl FieldController {
	/// Create a controller attaching flowers and bursts under `container`.
	pub fn new(container: HtmlElement, config: FieldConfig) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let document = window.document().ok_or(FieldError::NoDocument)?;
		let controller = Self {
			window,
			runtime: Rc::new(RefCell::new(FieldRuntime {
				state: FieldState::new(),
				config,
				rng: JsRandom,
				document,
				container,
				animating: false,
			})),
			frame: Rc::new(RefCell::new(None)),
			spawner: Rc::new(RefCell::new(Spawner::default())),
		};
		controller.install_frame_loop();
		Ok(controller)
	}

	fn environment(&self) -> Environment {
		Environment::probe(&self.window)
	}

	fn regular_tick_spawns(&self) -> bool {
		let env = self.environment();
		policy::regular_tick_spawns(&env, &self.runtime.borrow().config.capacity)
	}

	fn degraded_tick_spawns(&self) -> bool {
		let mut guard = self.runtime.borrow_mut();
		let rt = &mut *guard;
		policy::degraded_tick_spawns(&mut rt.rng, &rt.config.spawner)
	}

	/// Spawn one flower if capacity and visibility allow.
	pub fn spawn_one(&self) {
		let env = self.environment();
		let spawned = {
			let mut guard = self.runtime.borrow_mut();
			let rt = &mut *guard;
			let (document, container) = (&rt.document, &rt.container);
			rt.state
				.try_spawn(&env, &rt.config, &mut rt.rng, |spec| {
					match dom::create_flower(document, container, spec) {
						Ok(el) => Some(el),
						Err(e) => {
							warn!("petal-drift: flower element failed: {}", e);
							None
						}
					}
				})
				.map(|spec| (spec.id, spec.removal_delay_ms(rt.config.flower.removal_buffer_ms)))
		};
		let Some((id, delay_ms)) = spawned else {
			return;
		};

		let controller = self.clone();
		if let Err(e) = dom::set_timeout(&self.window, delay_ms, move || controller.remove_flower(id)) {
			// Without a removal timer the flower would hold a slot forever.
			warn!("petal-drift: removal timer failed: {}", e);
			self.remove_flower(id);
			return;
		}
		self.ensure_animating();
	}

	fn remove_flower(&self, id: u64) {
		let released = self.runtime.borrow_mut().state.release(id);
		if let Some(el) = released {
			el.remove();
		}
	}

	fn install_frame_loop(&self) {
		let (runtime, frame, window) = (self.runtime.clone(), self.frame.clone(), self.window.clone());
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			let keep_going = {
				let mut guard = runtime.borrow_mut();
				let rt = &mut *guard;
				let alive = rt
					.state
					.step_sway(&rt.config, &mut rt.rng, |el, angle| dom::set_rotation(el, angle));
				rt.animating = alive;
				alive
			};
			if keep_going {
				if let Some(ref cb) = *frame.borrow() {
					if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
						runtime.borrow_mut().animating = false;
					}
				}
			}
		}));
	}

	/// Start the shared sway loop unless it is already running.
	fn ensure_animating(&self) {
		{
			let mut rt = self.runtime.borrow_mut();
			if rt.animating {
				return;
			}
			rt.animating = true;
		}
		if let Some(ref cb) = *self.frame.borrow() {
			if let Err(e) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				warn!("petal-drift: requestAnimationFrame failed: {:?}", e);
				self.runtime.borrow_mut().animating = false;
			}
		}
	}

	/// (Re)start the regular spawn timer.
	///
	/// Under reduced motion nothing happens, not even clearing a previous
	/// timer. Otherwise the previous timer is replaced with a fresh period.
	pub fn start_spawner(&self) {
		let env = self.environment();
		let period = {
			let mut guard = self.runtime.borrow_mut();
			let rt = &mut *guard;
			policy::spawn_period_ms(&env, &rt.config.capacity, &rt.config.spawner, &mut rt.rng)
		};
		let Some(period) = period else {
			debug!("petal-drift: reduced motion preferred, spawner idle");
			return;
		};

		let controller = self.clone();
		let tick = Closure::new(move || {
			if controller.regular_tick_spawns() {
				controller.spawn_one();
			}
		});
		let mut spawner = self.spawner.borrow_mut();
		match spawner.replace(&self.window, period, tick) {
			Ok(()) => debug!("petal-drift: spawner every {}ms", period),
			Err(e) => warn!("petal-drift: spawn timer failed: {}", e),
		}
	}

	/// Replace the spawn timer with the slow, mostly-skipping low-data timer.
	///
	/// Applied once at load; a later [`start_spawner`](Self::start_spawner)
	/// from a resize or visibility change reverts to the regular timer.
	pub fn start_degraded(&self) {
		let period = self.runtime.borrow().config.spawner.degraded_period_ms;
		let controller = self.clone();
		let tick = Closure::new(move || {
			if controller.degraded_tick_spawns() {
				controller.spawn_one();
			}
		});
		let mut spawner = self.spawner.borrow_mut();
		match spawner.replace(&self.window, period, tick) {
			Ok(()) => info!("petal-drift: constrained network, spawner every {}ms", period),
			Err(e) => warn!("petal-drift: degraded timer failed: {}", e),
		}
	}

	/// Show a burst at `(x, y)` and push nearby flowers away from it.
	pub fn on_pointer_activate(&self, x: f64, y: f64) {
		let (burst_lifetime, marker_ms, repelled) = {
			let mut guard = self.runtime.borrow_mut();
			let rt = &mut *guard;

			let glyph = rt
				.rng
				.pick(&rt.config.theme.bursts.glyphs)
				.map(String::as_str)
				.unwrap_or(FALLBACK_BURST);
			let burst = match dom::create_burst(&rt.document, &rt.container, glyph, x, y) {
				Ok(el) => Some(el),
				Err(e) => {
					warn!("petal-drift: burst element failed: {}", e);
					None
				}
			};

			let mut repelled = Vec::new();
			for flower in rt.state.attached() {
				let center = dom::visual_center(&flower.handle);
				let Some(impulse) = repel::impulse((x, y), center, &rt.config.repel, &mut rt.rng)
				else {
					continue;
				};
				match dom::apply_repel(&flower.handle, &impulse) {
					Ok(()) => repelled.push(flower.id()),
					Err(e) => warn!("petal-drift: repel failed on flower {}: {}", flower.id(), e),
				}
			}
			trace!(
				"petal-drift: pointer at ({x:.0}, {y:.0}) pushed {} of {} flowers",
				repelled.len(),
				rt.state.active()
			);
			(burst.map(|b| (b, rt.config.burst.lifetime_ms)), rt.config.repel.marker_ms, repelled)
		};

		if let Some((burst, lifetime_ms)) = burst_lifetime {
			let el = burst.clone();
			if let Err(e) = dom::set_timeout(&self.window, lifetime_ms, move || el.remove()) {
				warn!("petal-drift: burst timer failed: {}", e);
				burst.remove();
			}
		}

		for id in repelled {
			let controller = self.clone();
			if let Err(e) = dom::set_timeout(&self.window, marker_ms, move || controller.clear_repel(id)) {
				warn!("petal-drift: repel marker timer failed: {}", e);
			}
		}
	}

	fn clear_repel(&self, id: u64) {
		if let Some(flower) = self.runtime.borrow().state.get(id) {
			dom::clear_repel(&flower.handle);
		}
	}

	/// Register host listeners, start spawning, and switch to the low-data
	/// timer on constrained connections.
	///
	/// Click and touchstart are both wired to the pointer handler, so one tap
	/// on a touch device can fire it twice.
	pub fn bootstrap(&self) -> Result<(), FieldError> {
		let document = self.runtime.borrow().document.clone();

		let controller = self.clone();
		let on_visibility = Closure::<dyn FnMut()>::new(move || controller.start_spawner());
		document.add_event_listener_with_callback(
			"visibilitychange",
			on_visibility.as_ref().unchecked_ref(),
		)?;
		on_visibility.forget();

		for event in ["resize", "orientationchange"] {
			let controller = self.clone();
			let on_viewport = Closure::<dyn FnMut()>::new(move || controller.start_spawner());
			self.window
				.add_event_listener_with_callback(event, on_viewport.as_ref().unchecked_ref())?;
			on_viewport.forget();
		}

		let controller = self.clone();
		let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			controller.on_pointer_activate(ev.client_x() as f64, ev.client_y() as f64);
		});
		self.window
			.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
		on_click.forget();

		let controller = self.clone();
		let on_touch = Closure::<dyn FnMut(TouchEvent)>::new(move |ev: TouchEvent| {
			if let Some(touch) = ev.touches().get(0) {
				controller.on_pointer_activate(touch.client_x() as f64, touch.client_y() as f64);
			}
		});
		let options = AddEventListenerOptions::new();
		options.set_passive(true);
		self.window.add_event_listener_with_callback_and_add_event_listener_options(
			"touchstart",
			on_touch.as_ref().unchecked_ref(),
			&options,
		)?;
		on_touch.forget();

		self.start_spawner();

		let env = self.environment();
		if policy::should_degrade(&env) {
			self.start_degraded();
		}

		info!(
			"petal-drift: field ready ({}px wide, limit {}, spawner {})",
			env.viewport_width,
			policy::max_concurrent(&env, &self.runtime.borrow().config.capacity),
			match self.spawner.borrow().period_ms() {
				Some(ms) => format!("{ms}ms"),
				None => "idle".to_string(),
			}
		);
		Ok(())
	}
}
