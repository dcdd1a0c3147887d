//! Tree layout
//!
//! - [`engine`]: [`LayoutEngine`], the frame-gated placement and easing pass
//! - [`cache`]: Last known positions, tagged with tree revision and viewport
//! - [`errors`]: Internal faults, always masked by the fallback placement
//!
//! # Placement
//!
//! Each level sits at `margin + depth × levelSpacing`. Within a level, nodes
//! get equal-width slots in id order. A parent with several children floats
//! over the mean of their current positions, which converges over a few
//! frames as the children ease into place. Displayed `x` moves a fixed
//! fraction of the remaining distance per pass and snaps once close enough;
//! `y` is set directly.
//!
//! # States
//!
//! ```text
//! COLD ──successful pass──▶ WARM
//!  ▲                          │
//!  └──── push / pop / resize / reset
//! ```

pub mod cache;
pub mod engine;
pub mod errors;

pub use cache::{CachedPosition, LayoutCache};
pub use engine::{LayoutEngine, LayoutState, UpdateOutcome};
pub use errors::LayoutError;
