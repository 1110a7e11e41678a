//! Capacity policy: how many flowers may exist, whether spawning is allowed
//! right now, and how fast the spawner ticks.
//!
//! All functions are pure over an [`Environment`] snapshot.

use super::config::{CapacityConfig, SpawnerConfig};
use super::environment::{Environment, NetworkHint};
use super::random::RandomSource;

/// Viewport width with the configured floor applied.
pub fn effective_width(env: &Environment, config: &CapacityConfig) -> f64 {
	env.viewport_width.max(config.min_width)
}

/// Narrow-viewport layout: slower spawning and smaller glyphs.
pub fn is_narrow(env: &Environment, config: &CapacityConfig) -> bool {
	effective_width(env, config) < config.narrow_width
}

/// Maximum number of concurrent flowers. Zero under reduced motion.
pub fn max_concurrent(env: &Environment, config: &CapacityConfig) -> usize {
	if env.reduced_motion {
		return 0;
	}
	let width = effective_width(env, config);
	if env.touch || width < config.narrow_width {
		config.narrow_limit
	} else if width < config.medium_width {
		config.medium_limit
	} else {
		config.wide_limit
	}
}

/// Whether a flower may be created right now, capacity aside.
pub fn can_spawn(env: &Environment, config: &CapacityConfig) -> bool {
	env.visible && max_concurrent(env, config) > 0
}

/// Period of the regular spawn timer, or `None` when no timer should run.
///
/// Jitter is drawn here, once per spawner start, not per tick.
pub fn spawn_period_ms<R: RandomSource + ?Sized>(
	env: &Environment,
	capacity: &CapacityConfig,
	spawner: &SpawnerConfig,
	rng: &mut R,
) -> Option<u32> {
	if env.reduced_motion {
		return None;
	}
	let base = if is_narrow(env, capacity) {
		spawner.narrow_base_ms
	} else {
		spawner.wide_base_ms
	};
	let jitter = rng.range(&spawner.jitter_ms);
	Some((base + jitter).round().max(1.0) as u32)
}

/// Save-data mode or a 2G-class connection.
pub fn is_constrained_network(hint: &NetworkHint) -> bool {
	hint.save_data
		|| hint
			.effective_type
			.as_deref()
			.is_some_and(|t| t.contains("2g"))
}

/// Whether the low-data spawn timer should replace the regular one at load.
///
/// Never under reduced motion: that preference means no spawn timer at all.
pub fn should_degrade(env: &Environment) -> bool {
	!env.reduced_motion && is_constrained_network(&env.network)
}

/// Regular timer tick: spawn only when the policy currently allows it.
pub fn regular_tick_spawns(env: &Environment, config: &CapacityConfig) -> bool {
	can_spawn(env, config)
}

/// Low-data timer tick: most ticks are skipped outright.
pub fn degraded_tick_spawns<R: RandomSource + ?Sized>(rng: &mut R, config: &SpawnerConfig) -> bool {
	!rng.chance(config.degraded_skip_chance)
}
