//! Tuning for density, motion, timing and interaction.
//!
//! Every number the field uses lives here, grouped the way the effect is
//! built: capacity tiers, per-flower parameter ranges, spawner timing,
//! repulsion impulse and burst lifetime. Defaults are the shipped behavior;
//! a page can override any subset through a JSON script element, see
//! [`FieldConfig::from_json`].

use serde::Deserialize;

use super::error::FieldError;
use super::random::Range;
use super::theme::Theme;

/// Viewport breakpoints and the flower limit of each tier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
	/// Width floor applied before tier selection.
	pub min_width: f64,
	/// Below this width (or on touch devices) the narrow tier applies.
	pub narrow_width: f64,
	/// Below this width the medium tier applies.
	pub medium_width: f64,
	/// Flower limit on touch devices and narrow viewports.
	pub narrow_limit: usize,
	pub medium_limit: usize,
	/// Flower limit from `medium_width` up.
	pub wide_limit: usize,
}

impl Default for CapacityConfig {
	fn default() -> Self {
		Self {
			min_width: 360.0,
			narrow_width: 520.0,
			medium_width: 900.0,
			narrow_limit: 6,
			medium_limit: 10,
			wide_limit: 18,
		}
	}
}

/// Longest accepted rise duration.
pub const MAX_RISE_SECS: f64 = 600.0;
/// Longest accepted removal buffer.
pub const MAX_REMOVAL_BUFFER_MS: u32 = 60_000;

/// Parameter ranges for a single flower.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowerConfig {
	/// Horizontal start, percent of viewport width.
	pub left_percent: Range,
	/// Glyph size in px below `capacity.narrow_width`.
	pub font_size_narrow: Range,
	pub font_size_wide: Range,
	/// Horizontal drift in pixels, handed to the stylesheet as `--drift`.
	pub drift_px: Range,
	/// Rise duration in seconds, handed to the stylesheet as `--rise-dur`.
	pub rise_secs: Range,
	/// Base rotation the sway oscillates around.
	pub rotation_deg: Range,
	/// Frames per radian of sway phase.
	pub sway_divisor: Range,
	/// Sway amplitude in degrees, redrawn every frame.
	pub sway_amplitude: Range,
	/// Extra time past the rise before the element is removed.
	pub removal_buffer_ms: u32,
}

impl Default for FlowerConfig {
	fn default() -> Self {
		Self {
			left_percent: Range::new(4.0, 96.0),
			font_size_narrow: Range::new(18.0, 34.0),
			font_size_wide: Range::new(20.0, 40.0),
			drift_px: Range::new(-25.0, 25.0),
			rise_secs: Range::new(5.5, 9.5),
			rotation_deg: Range::new(-20.0, 20.0),
			sway_divisor: Range::new(20.0, 60.0),
			sway_amplitude: Range::new(6.0, 14.0),
			removal_buffer_ms: 600,
		}
	}
}

/// Spawn timer periods.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
	/// Base period below `capacity.narrow_width`.
	pub narrow_base_ms: f64,
	pub wide_base_ms: f64,
	/// Drawn once per start, added to the base period.
	pub jitter_ms: Range,
	/// Fixed period used on save-data or 2G connections.
	pub degraded_period_ms: u32,
	/// Probability that a degraded tick spawns nothing.
	pub degraded_skip_chance: f64,
}

impl Default for SpawnerConfig {
	fn default() -> Self {
		Self {
			narrow_base_ms: 1000.0,
			wide_base_ms: 600.0,
			jitter_ms: Range::new(-200.0, 400.0),
			degraded_period_ms: 2500,
			degraded_skip_chance: 0.85,
		}
	}
}

/// Pointer repulsion impulse.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepelConfig {
	/// Flowers whose center is closer than this (px) are pushed.
	pub radius: f64,
	/// Distance floor for the direction vector.
	pub min_distance: f64,
	/// Horizontal push magnitude in px.
	pub push_x: Range,
	/// Vertical push magnitude in px.
	pub push_y: Range,
	pub rotation_deg: Range,
	pub scale: Range,
	/// Opacity set on pushed flowers.
	pub opacity: f64,
	/// How long the `repel` class stays on a pushed flower.
	pub marker_ms: u32,
}

impl Default for RepelConfig {
	fn default() -> Self {
		Self {
			radius: 140.0,
			min_distance: 20.0,
			push_x: Range::new(28.0, 80.0),
			push_y: Range::new(18.0, 80.0),
			rotation_deg: Range::new(-30.0, 30.0),
			scale: Range::new(0.9, 1.15),
			opacity: 0.92,
			marker_ms: 420,
		}
	}
}

/// Tap/click burst marker.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
	/// Time before the burst element is removed.
	pub lifetime_ms: u32,
}

impl Default for BurstConfig {
	fn default() -> Self {
		Self { lifetime_ms: 800 }
	}
}

/// Complete field configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Density tiers.
	pub capacity: CapacityConfig,
	/// Per-flower ranges.
	pub flower: FlowerConfig,
	/// Spawn timer.
	pub spawner: SpawnerConfig,
	/// Pointer repulsion.
	pub repel: RepelConfig,
	/// Tap/click marker.
	pub burst: BurstConfig,
	/// Glyph palettes.
	pub theme: Theme,
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override and validate the result.
	pub fn from_json(text: &str) -> Result<Self, FieldError> {
		let config: FieldConfig = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject values that would break tier ordering, timers or geometry.
	pub fn validate(&self) -> Result<(), FieldError> {
		let ranges = [
			("flower.left_percent", &self.flower.left_percent),
			("flower.font_size_narrow", &self.flower.font_size_narrow),
			("flower.font_size_wide", &self.flower.font_size_wide),
			("flower.drift_px", &self.flower.drift_px),
			("flower.rise_secs", &self.flower.rise_secs),
			("flower.rotation_deg", &self.flower.rotation_deg),
			("flower.sway_divisor", &self.flower.sway_divisor),
			("flower.sway_amplitude", &self.flower.sway_amplitude),
			("spawner.jitter_ms", &self.spawner.jitter_ms),
			("repel.push_x", &self.repel.push_x),
			("repel.push_y", &self.repel.push_y),
			("repel.rotation_deg", &self.repel.rotation_deg),
			("repel.scale", &self.repel.scale),
		];
		for (name, range) in ranges {
			if !range.is_valid() {
				return Err(FieldError::Config(format!(
					"{name} must satisfy min <= max (got {} > {})",
					range.min, range.max
				)));
			}
		}

		let cap = &self.capacity;
		if !(cap.min_width <= cap.narrow_width && cap.narrow_width <= cap.medium_width) {
			return Err(FieldError::Config(
				"capacity breakpoints must be non-decreasing".into(),
			));
		}
		if !(cap.narrow_limit < cap.medium_limit && cap.medium_limit < cap.wide_limit) {
			return Err(FieldError::Config(
				"capacity limits must strictly increase from narrow to wide".into(),
			));
		}
		let rise = &self.flower.rise_secs;
		if rise.min <= 0.0 || rise.max > MAX_RISE_SECS {
			return Err(FieldError::Config(format!(
				"flower.rise_secs must lie in (0, {MAX_RISE_SECS}]"
			)));
		}
		if self.flower.removal_buffer_ms > MAX_REMOVAL_BUFFER_MS {
			return Err(FieldError::Config(format!(
				"flower.removal_buffer_ms must be at most {MAX_REMOVAL_BUFFER_MS}"
			)));
		}
		if self.flower.sway_divisor.min <= 0.0 {
			return Err(FieldError::Config("flower.sway_divisor must be positive".into()));
		}
		if self.spawner.degraded_period_ms == 0 {
			return Err(FieldError::Config(
				"spawner.degraded_period_ms must be non-zero".into(),
			));
		}
		if !(0.0..=1.0).contains(&self.spawner.degraded_skip_chance) {
			return Err(FieldError::Config(
				"spawner.degraded_skip_chance must lie in [0, 1]".into(),
			));
		}
		if !(self.repel.radius > 0.0 && self.repel.min_distance > 0.0) {
			return Err(FieldError::Config(
				"repel.radius and repel.min_distance must be positive".into(),
			));
		}
		let lowest = self.spawner.narrow_base_ms.min(self.spawner.wide_base_ms);
		if lowest + self.spawner.jitter_ms.min < 1.0 {
			return Err(FieldError::Config(
				"spawner period can drop below 1ms with this jitter".into(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_validate() {
		assert!(FieldConfig::default().validate().is_ok());
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = FieldConfig::from_json(
			r#"{ "capacity": { "wide_limit": 30 }, "burst": { "lifetime_ms": 1200 } }"#,
		)
		.unwrap();
		assert_eq!(config.capacity.wide_limit, 30);
		assert_eq!(config.capacity.narrow_limit, 6);
		assert_eq!(config.burst.lifetime_ms, 1200);
		assert_eq!(config.repel, RepelConfig::default());
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
	}

	#[test]
	fn inverted_range_is_rejected() {
		let err = FieldConfig::from_json(r#"{ "flower": { "rise_secs": { "min": 9, "max": 2 } } }"#)
			.unwrap_err();
		assert!(matches!(err, FieldError::Config(ref msg) if msg.contains("flower.rise_secs")));
	}

	#[test]
	fn unordered_breakpoints_are_rejected() {
		let err =
			FieldConfig::from_json(r#"{ "capacity": { "medium_width": 400 } }"#).unwrap_err();
		assert!(matches!(err, FieldError::Config(_)));
	}

	#[test]
	fn inverted_tiers_are_rejected() {
		let err = FieldConfig::from_json(r#"{ "capacity": { "narrow_limit": 30, "wide_limit": 2 } }"#)
			.unwrap_err();
		assert!(matches!(err, FieldError::Config(ref msg) if msg.contains("limits")));
		assert!(FieldConfig::from_json(r#"{ "capacity": { "medium_limit": 18 } }"#).is_err());
	}

	#[test]
	fn oversized_rise_is_rejected() {
		let err = FieldConfig::from_json(
			r#"{ "flower": { "rise_secs": { "min": 5000000, "max": 5000000 } } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, FieldError::Config(ref msg) if msg.contains("rise_secs")));
		assert!(
			FieldConfig::from_json(r#"{ "flower": { "removal_buffer_ms": 4000000000 } }"#).is_err()
		);
	}

	#[test]
	fn non_positive_rise_is_rejected() {
		for rise in [r#"{ "min": -9, "max": -9 }"#, r#"{ "min": 0, "max": 3 }"#] {
			let json = format!(r#"{{ "flower": {{ "rise_secs": {rise} }} }}"#);
			assert!(FieldConfig::from_json(&json).is_err(), "accepted {rise}");
		}
	}

	#[test]
	fn repel_and_skip_bounds_are_checked() {
		assert!(FieldConfig::from_json(r#"{ "repel": { "radius": -1 } }"#).is_err());
		assert!(FieldConfig::from_json(r#"{ "repel": { "min_distance": 0 } }"#).is_err());
		assert!(FieldConfig::from_json(r#"{ "spawner": { "degraded_skip_chance": 4.0 } }"#).is_err());
		assert!(FieldConfig::from_json(r#"{ "spawner": { "degraded_skip_chance": 1.0 } }"#).is_ok());
	}

	#[test]
	fn malformed_json_is_a_json_error() {
		assert!(matches!(
			FieldConfig::from_json("{ not json"),
			Err(FieldError::Json(_))
		));
	}
}
