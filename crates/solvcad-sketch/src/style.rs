//! Display styles referenced by entities and constraints.
//!
//! Out of scope per `spec.md` §1 is the actual rendering; this crate keeps
//! only the handle and the handful of numeric fields that a style
//! contributes to regeneration/export (color, line width, construction
//! dash pattern), matching `solvcad-ids::HStyle`'s role as a pass-through
//! reference rather than a full style engine.

pub use solvcad_ids::HStyle as HStyleId;

/// A named display style. Geometry-affecting fields only: hidden UI
/// concerns (icon, menu command) stay out of the kernel per the Non-goals
/// of `spec.md` §1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub handle: HStyleId,
    pub color_rgba: u32,
    pub line_width: f64,
    /// `true` iff curves with this style should render dashed/construction.
    pub dashed: bool,
}

impl Style {
    pub fn new(handle: HStyleId, color_rgba: u32) -> Self {
        Style { handle, color_rgba, line_width: 1.0, dashed: false }
    }
}
