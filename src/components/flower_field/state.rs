//! Field state: the live flower registry and its counters.
//!
//! Generic over the element handle `H` so the bookkeeping can be exercised
//! without a browser. In the page `H` is the flower's `HtmlElement`.

use log::trace;

use super::config::FieldConfig;
use super::environment::Environment;
use super::flower::FlowerSpec;
use super::policy;
use super::random::RandomSource;

/// One live flower and its animation progress.
#[derive(Clone, Debug)]
pub struct Flower<H> {
	pub spec: FlowerSpec,
	pub handle: H,
	attached: bool,
	frame: u64,
}

impl<H> Flower<H> {
	pub fn id(&self) -> u64 {
		self.spec.id
	}

	pub fn is_attached(&self) -> bool {
		self.attached
	}
}

/// Registry of flowers plus the active count and id counter.
///
/// The active count tracks attached flowers only. Detached records linger
/// until the next sway step or spawn prunes them.
#[derive(Debug)]
pub struct FieldState<H> {
	flowers: Vec<Flower<H>>,
	active: usize,
	next_id: u64,
}

impl<H> Default for FieldState<H> {
	fn default() -> Self {
		Self {
			flowers: Vec::new(),
			active: 0,
			next_id: 0,
		}
	}
}

impl<H> FieldState<H> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn active(&self) -> usize {
		self.active
	}

	/// Spawn one flower if the policy allows it.
	///
	/// `attach` builds the visual for the drawn parameters; returning `None`
	/// abandons the spawn without touching the active count.
	pub fn try_spawn<R, F>(
		&mut self,
		env: &Environment,
		config: &FieldConfig,
		rng: &mut R,
		attach: F,
	) -> Option<FlowerSpec>
	where
		R: RandomSource + ?Sized,
		F: FnOnce(&FlowerSpec) -> Option<H>,
	{
		if !policy::can_spawn(env, &config.capacity)
			|| self.active >= policy::max_concurrent(env, &config.capacity)
		{
			return None;
		}
		self.prune();

		self.next_id += 1;
		let narrow = policy::is_narrow(env, &config.capacity);
		let spec = FlowerSpec::generate(
			self.next_id,
			narrow,
			&config.flower,
			&config.theme.flowers,
			rng,
		);
		let handle = attach(&spec)?;

		self.active += 1;
		trace!("petal-drift: flower {} spawned ({} active)", spec.id, self.active);
		self.flowers.push(Flower {
			spec: spec.clone(),
			handle,
			attached: true,
			frame: 0,
		});
		Some(spec)
	}

	/// Mark a flower detached and hand back its handle for removal.
	///
	/// Only the first call for a given id has any effect.
	pub fn release(&mut self, id: u64) -> Option<H>
	where
		H: Clone,
	{
		let flower = self
			.flowers
			.iter_mut()
			.find(|f| f.attached && f.spec.id == id)?;
		flower.attached = false;
		self.active = self.active.saturating_sub(1);
		trace!("petal-drift: flower {} released ({} active)", id, self.active);
		Some(flower.handle.clone())
	}

	/// Attached flower by id.
	pub fn get(&self, id: u64) -> Option<&Flower<H>> {
		self.flowers.iter().find(|f| f.is_attached() && f.id() == id)
	}

	pub fn attached(&self) -> impl Iterator<Item = &Flower<H>> {
		self.flowers.iter().filter(|f| f.is_attached())
	}

	/// Advance every attached flower by one frame and hand `apply` its new
	/// rotation. Returns whether any flower is still attached.
	pub fn step_sway<R, F>(&mut self, config: &FieldConfig, rng: &mut R, mut apply: F) -> bool
	where
		R: RandomSource + ?Sized,
		F: FnMut(&H, f64),
	{
		self.prune();
		for flower in &mut self.flowers {
			flower.frame += 1;
			let amplitude = rng.range(&config.flower.sway_amplitude);
			apply(&flower.handle, flower.spec.sway_angle(flower.frame, amplitude));
		}
		!self.flowers.is_empty()
	}

	fn prune(&mut self) {
		self.flowers.retain(|f| f.attached);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::flower_field::random::SeededRandom;

	fn desktop() -> Environment {
		Environment {
			viewport_width: 1280.0,
			..Environment::default()
		}
	}

	fn spawn(state: &mut FieldState<u64>, env: &Environment, rng: &mut SeededRandom) -> Option<u64> {
		state
			.try_spawn(env, &FieldConfig::default(), rng, |spec| Some(spec.id))
			.map(|spec| spec.id)
	}

	#[test]
	fn spawning_stops_at_capacity() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(5);
		let env = desktop();
		for _ in 0..18 {
			assert!(spawn(&mut state, &env, &mut rng).is_some());
		}
		assert_eq!(state.active(), 18);
		assert!(spawn(&mut state, &env, &mut rng).is_none());
		assert_eq!(state.active(), 18);
	}

	#[test]
	fn ids_are_monotonic() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(5);
		let env = desktop();
		let a = spawn(&mut state, &env, &mut rng).unwrap();
		let b = spawn(&mut state, &env, &mut rng).unwrap();
		state.release(a);
		let c = spawn(&mut state, &env, &mut rng).unwrap();
		assert!(a < b && b < c);
	}

	#[test]
	fn spawn_is_a_no_op_when_policy_refuses() {
		let mut rng = SeededRandom::new(5);
		for env in [
			Environment {
				visible: false,
				..desktop()
			},
			Environment {
				reduced_motion: true,
				..desktop()
			},
		] {
			let mut state: FieldState<u64> = FieldState::new();
			let mut attached = false;
			let result = state.try_spawn(&env, &FieldConfig::default(), &mut rng, |spec| {
				attached = true;
				Some(spec.id)
			});
			assert!(result.is_none());
			assert!(!attached);
			assert_eq!(state.active(), 0);
			assert_eq!(state.attached().count(), 0);
		}
	}

	#[test]
	fn failed_attach_leaves_count_alone() {
		let mut state: FieldState<u64> = FieldState::new();
		let mut rng = SeededRandom::new(5);
		let result = state.try_spawn(&desktop(), &FieldConfig::default(), &mut rng, |_| None);
		assert!(result.is_none());
		assert_eq!(state.active(), 0);
	}

	#[test]
	fn release_decrements_exactly_once() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(9);
		let env = desktop();
		let a = spawn(&mut state, &env, &mut rng).unwrap();
		let b = spawn(&mut state, &env, &mut rng).unwrap();
		assert_eq!(state.release(a), Some(a));
		assert_eq!(state.active(), 1);
		assert_eq!(state.release(a), None);
		assert_eq!(state.active(), 1);
		assert_eq!(state.release(b), Some(b));
		assert_eq!(state.release(b), None);
		assert_eq!(state.release(404), None);
		assert_eq!(state.active(), 0);
	}

	#[test]
	fn released_flowers_drop_out_of_queries() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(2);
		let env = desktop();
		let a = spawn(&mut state, &env, &mut rng).unwrap();
		let b = spawn(&mut state, &env, &mut rng).unwrap();
		state.release(a);
		assert!(state.get(a).is_none());
		assert!(state.get(b).is_some_and(|f| f.is_attached()));
		let ids: Vec<u64> = state.attached().map(|f| f.id()).collect();
		assert_eq!(ids, vec![b]);
	}

	#[test]
	fn capacity_frees_up_after_release() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(4);
		let env = Environment {
			touch: true,
			..desktop()
		};
		let ids: Vec<u64> = (0..6).filter_map(|_| spawn(&mut state, &env, &mut rng)).collect();
		assert_eq!(ids.len(), 6);
		assert!(spawn(&mut state, &env, &mut rng).is_none());
		state.release(ids[2]);
		assert!(spawn(&mut state, &env, &mut rng).is_some());
		assert_eq!(state.active(), 6);
	}

	#[test]
	fn sway_steps_attached_flowers_until_none_remain() {
		let mut state = FieldState::new();
		let mut rng = SeededRandom::new(8);
		let env = desktop();
		let config = FieldConfig::default();
		let a = spawn(&mut state, &env, &mut rng).unwrap();
		let b = spawn(&mut state, &env, &mut rng).unwrap();

		let mut touched = Vec::new();
		assert!(state.step_sway(&config, &mut rng, |h, angle| {
			touched.push(*h);
			assert!(angle.abs() <= 20.0 + 14.0);
		}));
		assert_eq!(touched, vec![a, b]);
		assert_eq!(state.get(a).map(|f| f.frame), Some(1));

		state.release(a);
		touched.clear();
		assert!(state.step_sway(&config, &mut rng, |h, _| touched.push(*h)));
		assert_eq!(touched, vec![b]);
		assert_eq!(state.get(b).map(|f| f.frame), Some(2));

		state.release(b);
		assert!(!state.step_sway(&config, &mut rng, |_, _| {
			panic!("detached flower stepped");
		}));
	}
}
