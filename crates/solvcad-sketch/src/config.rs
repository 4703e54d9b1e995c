//! Numeric settings read at solve/generation time (`spec.md` §6.4).
//!
//! A plain struct rather than a dynamic settings registry, matching the
//! teacher's preference for concrete config structs (`solvcad-meshalgo`'s
//! tessellation options) over reflection.

/// Settings consulted while regenerating one group's geometry.
#[derive(Clone, Copy, Debug)]
pub struct RegenConfig {
    /// Maximum deviation of a PWL polyline from the curve it approximates.
    pub chord_tolerance: f64,
    /// Upper bound on PWL segments per curve; a span below `1/max_segments`
    /// of the curve's parameter range stops subdividing regardless of chord
    /// deviation.
    pub max_segments: usize,
    /// Chord tolerance used specifically when flattening curves for export
    /// (kept distinct from `chord_tolerance`, which governs the interactive
    /// display/solve path).
    pub export_chord_tolerance: f64,
}

impl Default for RegenConfig {
    fn default() -> Self {
        RegenConfig {
            chord_tolerance: 0.01,
            max_segments: 300,
            export_chord_tolerance: 0.001,
        }
    }
}

/// Settings consulted by the solver for one group.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveConfig {
    /// "All dimensions are reference": every non-comment constraint in the
    /// group is treated as if its `reference` flag were set, so its
    /// equations still let `modify_to_satisfy` run but contribute nothing
    /// to the Jacobian.
    pub all_dimensions_reference: bool,
    /// "Relax constraints": suppress every constraint in the group except
    /// `POINTS_COINCIDENT`, so the sketch can be dragged without fighting
    /// dimensional constraints mid-edit.
    pub relax_constraints: bool,
    /// "Allow redundant": a rank-deficient Jacobian is reported as
    /// `REDUNDANT_OKAY` instead of failing the caller's expectations; set
    /// by callers that intentionally keep redundant reference dimensions.
    pub allow_redundant: bool,
    /// Force a full degree-of-freedom analysis even when the substitution
    /// pass (solver step 2) would otherwise run; used by the DOF report in
    /// the UI-facing layer, never needed by a plain solve.
    pub force_dof_check: bool,
}
