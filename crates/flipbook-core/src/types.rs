//! Closed enums shared with the page-flip engine.
//!
//! Every variant has a fixed wire string, used for DOM attributes, engine
//! settings, and event payloads alike.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlipBookError;

macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		$name:ident {
			$( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				$(#[$vmeta])*
				#[serde(rename = $wire)]
				$variant,
			)+
		}

		impl $name {
			/// All variants in declaration order.
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			/// Returns the wire string for this variant.
			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $wire,)+
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl FromStr for $name {
			type Err = FlipBookError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($wire => Ok($name::$variant),)+
					other => Err(FlipBookError::UnknownVariant {
						kind: stringify!($name),
						value: other.to_string(),
					}),
				}
			}
		}
	};
}

wire_enum! {
	/// Whether a page bends (`soft`) or stays rigid (`hard`) while flipping.
	#[derive(Default)]
	PageDensity {
		/// Flexible page.
		#[default]
		Soft => "soft",
		/// Rigid page, used for covers.
		Hard => "hard",
	}
}

wire_enum! {
	/// Whether the book keeps its configured size or stretches to its parent.
	#[derive(Default)]
	SizeType {
		/// Fixed width and height.
		#[default]
		Fixed => "fixed",
		/// Stretch within the min/max bounds.
		Stretch => "stretch",
	}
}

wire_enum! {
	/// Single-page or two-page spread.
	#[derive(Default)]
	PageOrientation {
		/// One page visible.
		Portrait => "portrait",
		/// Two-page spread.
		#[default]
		Landscape => "landscape",
	}
}

wire_enum! {
	/// Interaction state reported by the engine.
	PageState {
		/// The user is dragging a page.
		UserFold => "user_fold",
		/// A corner is folded under the pointer.
		FoldCorner => "fold_corner",
		/// A flip animation is running.
		Flipping => "flipping",
		/// Idle.
		Read => "read",
	}
}

wire_enum! {
	/// Corner a flip animation starts from.
	FlipCorner {
		/// Top corner.
		Top => "top",
		/// Bottom corner.
		Bottom => "bottom",
	}
}

wire_enum! {
	/// Which end of the book a cover sits at.
	#[derive(Default)]
	CoverPosition {
		/// Front cover.
		#[default]
		Front => "front",
		/// Back cover.
		Back => "back",
	}
}
