//! Glyph palettes for flowers and bursts.

use serde::Deserialize;

/// A set of emoji glyphs drawn from uniformly.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct GlyphPalette {
	/// Emoji, one per entry.
	pub glyphs: Vec<String>,
}

impl GlyphPalette {
	fn from_strs(glyphs: &[&str]) -> Self {
		Self {
			glyphs: glyphs.iter().map(|g| g.to_string()).collect(),
		}
	}

	/// Blossoms that rise from the bottom of the viewport (default).
	pub fn blossoms() -> Self {
		Self::from_strs(&["🌸", "🌼", "🌺", "🌷", "🌻", "💮"])
	}

	/// Sparkles shown at a tap or click point.
	pub fn sparkles() -> Self {
		Self::from_strs(&["✨", "💫", "🌟"])
	}
}

/// Visual style for the field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
	/// Glyphs for rising flowers.
	pub flowers: GlyphPalette,
	/// Glyphs for tap/click bursts.
	pub bursts: GlyphPalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			flowers: GlyphPalette::blossoms(),
			bursts: GlyphPalette::sparkles(),
		}
	}
}

/// Used when a configured flower palette is empty.
pub const FALLBACK_FLOWER: &str = "🌸";
/// Used when a configured burst palette is empty.
pub const FALLBACK_BURST: &str = "✨";
