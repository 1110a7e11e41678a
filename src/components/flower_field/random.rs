//! Random sources for flower parameters.
//!
//! Every randomized draw in the field goes through [`RandomSource`] so the
//! pure parts of the effect can run off the browser with a deterministic
//! generator.

use serde::Deserialize;

/// Closed-open numeric interval `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Range {
	/// Lower bound (inclusive).
	pub min: f64,
	/// Upper bound.
	pub max: f64,
}

impl Range {
	/// Range from `min` to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Whether `value` lies within the bounds, both ends included.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}

	/// Finite bounds with `min <= max`.
	pub fn is_valid(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.min <= self.max
	}
}

/// A stream of uniform values in `[0, 1)`.
pub trait RandomSource {
	fn next_unit(&mut self) -> f64;

	/// Uniform sample inside `range`.
	fn range(&mut self, range: &Range) -> f64 {
		range.min + self.next_unit() * (range.max - range.min)
	}

	/// `-1.0` or `1.0` with equal odds.
	fn sign(&mut self) -> f64 {
		if self.next_unit() < 0.5 { -1.0 } else { 1.0 }
	}

	/// True with probability `p`.
	fn chance(&mut self, p: f64) -> bool {
		self.next_unit() < p
	}

	fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
		if items.is_empty() {
			return None;
		}
		let idx = (self.next_unit() * items.len() as f64) as usize;
		items.get(idx.min(items.len() - 1))
	}
}

/// Browser `Math.random()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsRandom;

impl RandomSource for JsRandom {
	fn next_unit(&mut self) -> f64 {
		js_sys::Math::random()
	}
}

/// Deterministic generator for reproducible draws.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct SeededRandom {
	seed: f64,
}

#[cfg(test)]
impl SeededRandom {
	pub fn new(seed: u32) -> Self {
		Self {
			seed: seed as f64 + 0.5,
		}
	}

	fn hash(seed: f64) -> f64 {
		let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
		x - x.floor()
	}
}

#[cfg(test)]
impl RandomSource for SeededRandom {
	fn next_unit(&mut self) -> f64 {
		self.seed += 1.0;
		// fract() can round up to exactly 1.0 for large products
		Self::hash(self.seed * 1.1).min(1.0 - f64::EPSILON)
	}
}

/// Always yields the same value. Pins draws to a known point of each range.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(pub f64);

#[cfg(test)]
impl RandomSource for FixedRandom {
	fn next_unit(&mut self) -> f64 {
		self.0
	}
}
