//! Radial repulsion applied to flowers near a pointer activation.

use super::config::RepelConfig;
use super::random::RandomSource;

/// Outward push for one flower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
	pub dx: f64,
	pub dy: f64,
	pub rotation_deg: f64,
	pub scale: f64,
	pub opacity: f64,
}

impl Impulse {
	/// CSS `transform` value for this impulse.
	pub fn to_css_transform(&self) -> String {
		format!(
			"translate({:.1}px, {:.1}px) rotate({:.1}deg) scale({:.3})",
			self.dx, self.dy, self.rotation_deg, self.scale
		)
	}
}

/// Impulse for a flower centered at `center` after activation at `pointer`,
/// or `None` if it sits outside the repel radius.
pub fn impulse<R: RandomSource + ?Sized>(
	pointer: (f64, f64),
	center: (f64, f64),
	config: &RepelConfig,
	rng: &mut R,
) -> Option<Impulse> {
	let (dx, dy) = (center.0 - pointer.0, center.1 - pointer.1);
	let dist = dx.hypot(dy);
	if dist >= config.radius {
		return None;
	}

	let d = dist.max(config.min_distance);
	let (ux, uy) = (dx / d, dy / d);
	Some(Impulse {
		dx: ux * rng.range(&config.push_x),
		dy: uy * rng.range(&config.push_y),
		rotation_deg: rng.range(&config.rotation_deg),
		scale: rng.range(&config.scale),
		opacity: config.opacity,
	})
}
