//! Per-flower parameters and sway motion.

use super::config::FlowerConfig;
use super::random::RandomSource;
use super::theme::{FALLBACK_FLOWER, GlyphPalette};

/// Randomized, immutable parameters of one flower, drawn at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerSpec {
	pub id: u64,
	pub glyph: String,
	/// Horizontal start, percent of viewport width.
	pub left_percent: f64,
	pub font_size_px: f64,
	pub drift_px: f64,
	pub rise_secs: f64,
	/// Initial rotation; the sway oscillates around it.
	pub base_rotation_deg: f64,
	pub sway_divisor: f64,
	/// `-1.0` or `1.0`.
	pub sway_direction: f64,
}

impl FlowerSpec {
	pub fn generate<R: RandomSource + ?Sized>(
		id: u64,
		narrow: bool,
		config: &FlowerConfig,
		palette: &GlyphPalette,
		rng: &mut R,
	) -> Self {
		let glyph = rng
			.pick(&palette.glyphs)
			.map(String::as_str)
			.unwrap_or(FALLBACK_FLOWER)
			.to_string();
		let left_percent = rng.range(&config.left_percent);
		let font_size_px = if narrow {
			rng.range(&config.font_size_narrow)
		} else {
			rng.range(&config.font_size_wide)
		};
		let drift_px = rng.range(&config.drift_px);
		let rise_secs = rng.range(&config.rise_secs);
		let base_rotation_deg = rng.range(&config.rotation_deg);
		let sway_divisor = rng.range(&config.sway_divisor);
		let sway_direction = rng.sign();

		Self {
			id,
			glyph,
			left_percent,
			font_size_px,
			drift_px,
			rise_secs,
			base_rotation_deg,
			sway_divisor,
			sway_direction,
		}
	}

	/// Delay after which the flower is detached.
	pub fn removal_delay_ms(&self, buffer_ms: u32) -> u32 {
		// `as` saturates, so a negative or huge rise clamps instead of wrapping
		((self.rise_secs * 1000.0).round() as u32).saturating_add(buffer_ms)
	}

	/// Rotation at `frame` frames after spawn with this frame's amplitude.
	pub fn sway_angle(&self, frame: u64, amplitude: f64) -> f64 {
		let phase = frame as f64 / self.sway_divisor;
		self.base_rotation_deg + phase.sin() * amplitude * self.sway_direction
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::flower_field::random::{FixedRandom, SeededRandom};

	#[test]
	fn parameters_stay_in_their_ranges() {
		let config = FlowerConfig::default();
		let palette = GlyphPalette::blossoms();
		let mut rng = SeededRandom::new(11);
		for id in 0..1000 {
			let narrow = id % 2 == 0;
			let spec = FlowerSpec::generate(id, narrow, &config, &palette, &mut rng);
			assert!(palette.glyphs.contains(&spec.glyph));
			assert!(config.left_percent.contains(spec.left_percent));
			let sizes = if narrow {
				config.font_size_narrow
			} else {
				config.font_size_wide
			};
			assert!(sizes.contains(spec.font_size_px));
			assert!(config.drift_px.contains(spec.drift_px));
			assert!(config.rise_secs.contains(spec.rise_secs));
			assert!(config.rotation_deg.contains(spec.base_rotation_deg));
			assert!(config.sway_divisor.contains(spec.sway_divisor));
			assert!(spec.sway_direction == 1.0 || spec.sway_direction == -1.0);
		}
	}

	#[test]
	fn narrow_viewports_get_smaller_glyphs() {
		let config = FlowerConfig::default();
		let palette = GlyphPalette::blossoms();
		let narrow = FlowerSpec::generate(1, true, &config, &palette, &mut FixedRandom(0.0));
		let wide = FlowerSpec::generate(1, false, &config, &palette, &mut FixedRandom(0.0));
		assert_eq!(narrow.font_size_px, 18.0);
		assert_eq!(wide.font_size_px, 20.0);
	}

	#[test]
	fn empty_palette_falls_back() {
		let palette = GlyphPalette { glyphs: vec![] };
		let spec = FlowerSpec::generate(1, false, &FlowerConfig::default(), &palette, &mut FixedRandom(0.3));
		assert_eq!(spec.glyph, FALLBACK_FLOWER);
	}

	#[test]
	fn removal_delay_adds_buffer() {
		let mut spec = FlowerSpec::generate(
			1,
			false,
			&FlowerConfig::default(),
			&GlyphPalette::blossoms(),
			&mut FixedRandom(0.0),
		);
		spec.rise_secs = 5.5;
		assert_eq!(spec.removal_delay_ms(600), 6100);
		spec.rise_secs = 9.4996;
		assert_eq!(spec.removal_delay_ms(600), 10100);
	}

	#[test]
	fn removal_delay_never_wraps() {
		let mut spec = FlowerSpec::generate(
			1,
			false,
			&FlowerConfig::default(),
			&GlyphPalette::blossoms(),
			&mut FixedRandom(0.0),
		);
		spec.rise_secs = 5_000_000.0;
		assert_eq!(spec.removal_delay_ms(600), u32::MAX);
		spec.rise_secs = -9.0;
		assert_eq!(spec.removal_delay_ms(600), 600);
	}

	#[test]
	fn sway_oscillates_around_base() {
		let mut spec = FlowerSpec::generate(
			1,
			false,
			&FlowerConfig::default(),
			&GlyphPalette::blossoms(),
			&mut FixedRandom(0.5),
		);
		spec.base_rotation_deg = 10.0;
		spec.sway_divisor = 20.0;
		spec.sway_direction = -1.0;
		assert_eq!(spec.sway_angle(0, 14.0), 10.0);
		for frame in 0..400 {
			let angle = spec.sway_angle(frame, 14.0);
			assert!((angle - 10.0).abs() <= 14.0 + 1e-9);
		}
		// quarter period: sin(pi/2) = 1, pushed against the direction sign
		let quarter = (20.0 * std::f64::consts::FRAC_PI_2).round() as u64;
		assert!(spec.sway_angle(quarter, 10.0) < 0.5);
	}
}
