//! Top-level sketch document: the tables a regeneration pass reads and
//! writes, and the orchestration loop itself (`spec.md` §4.2, §4.6).
//! Grounded on `examples/original_source/src/sketch.h`'s `SK` struct
//! (parallel param/entity/constraint/request/group tables) and its
//! `GenerateAll` driver.

use std::collections::HashMap;

use solvcad_base::cgmath64::{Point3, Quaternion};
use solvcad_ids::{HConstraint, HEntity, HGroup, HParam, HRequest, IdTable, Owner};
use solvcad_modeling::Solid;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SolveConfig;
use crate::constraint::Constraint;
use crate::entity::Entity;
use crate::group::{Group, GroupKind};
use crate::param::ParamTable;
use crate::profile::{assemble_profiles, Profile, ProfileStatus};
use crate::request::{Request, RequestInitialGeometry};
use crate::solver::{solve_group, SolveResult};
use crate::style::Style;

/// Every table a sketch document owns, bundled so regeneration and group
/// code can borrow them together without threading five parameters
/// everywhere (§4.2's "SK" global in the reference design, made an
/// explicit value here instead of a singleton).
#[derive(Clone, Debug, Default)]
pub struct SketchTables {
    pub requests: IdTable<HRequest, Request>,
    pub groups: IdTable<HGroup, Group>,
    pub entities: IdTable<HEntity, Entity>,
    pub params: ParamTable,
    pub constraints: IdTable<HConstraint, Constraint>,
    pub styles: IdTable<solvcad_ids::HStyle, Style>,
}

/// Failure of one group's regeneration (§4.5, §4.6). Matches the reference
/// design's per-group regeneration status, reported with the offending
/// group so a caller can point the user at it.
#[derive(Debug, Error)]
pub enum RegenError {
    #[error("group {0:?} has more unknowns ({1}) than the solver's hard limit")]
    TooManyUnknowns(HGroup, usize),
    #[error("group {0:?} didn't converge")]
    DidntConverge(HGroup),
    #[error("group {0:?} is redundantly constrained by {1:?}")]
    Redundant(HGroup, Vec<HConstraint>),
    #[error("group {0:?}'s profile is {1:?}, required GOOD to sweep a solid")]
    BadProfile(HGroup, ProfileStatus),
}

/// The result of a full regeneration: the combined solid (if any group
/// produced one), and the assembled profile loops per solid-producing
/// group (kept around for UI highlighting of open/self-intersecting
/// sketches, §4.6 step 3).
#[derive(Clone, Debug, Default)]
pub struct RegenResult {
    pub solid: Option<Solid>,
    pub profiles: HashMap<HGroup, Vec<Profile>>,
}

/// A complete parametric document: tables plus the insertion order of its
/// groups, the only ordering regeneration must respect (§5's "groups
/// regenerate in the user-declared order").
#[derive(Clone, Debug, Default)]
pub struct Sketch {
    pub tables: SketchTables,
    pub group_order: Vec<HGroup>,
    next_request_index: u16,
    /// Seed geometry for each request's next `generate()` call, refreshed
    /// from solved values after every regeneration so repeated
    /// regenerations start Newton from the last solution instead of from
    /// the origin (§4.2).
    request_initial: HashMap<HRequest, RequestInitialGeometry>,
}

impl Sketch {
    pub fn new() -> Self {
        Sketch { next_request_index: 4, ..Default::default() }
    }

    pub fn add_group(&mut self, handle: HGroup, kind: GroupKind) {
        self.tables.groups.add_and_keep_handle(handle, Group::new(handle, kind));
        self.group_order.push(handle);
    }

    pub fn add_request(&mut self, group: HGroup, workplane: Option<HEntity>, kind: crate::request::RequestKind, initial: RequestInitialGeometry) -> HRequest {
        let h = crate::request::add_request(&mut self.tables.requests, &mut self.next_request_index, group, workplane, kind);
        self.request_initial.insert(h, initial);
        h
    }

    /// Inserts a request under an explicit, caller-chosen handle rather than
    /// minting the next sequential one. Used by a `.slvs` loader replaying
    /// previously-assigned handles verbatim, since those handles are already
    /// baked into every constraint/group that references the request's
    /// generated entities.
    pub fn add_request_with_handle(&mut self, handle: HRequest, request: Request, initial: RequestInitialGeometry) {
        self.tables.requests.add_and_keep_handle(handle, request);
        self.request_initial.insert(handle, initial);
        self.next_request_index = self.next_request_index.max(handle.index().saturating_add(1));
    }

    /// Current value of the sequential-request-handle allocator, for a
    /// loader to inspect after replaying explicit handles.
    pub fn next_request_index(&self) -> u16 { self.next_request_index }

    /// The seed geometry a request was created or last solved with, if any.
    pub fn request_initial(&self, h: HRequest) -> Option<&RequestInitialGeometry> { self.request_initial.get(&h) }

    pub fn add_constraint(&mut self, group: HGroup, workplane: Option<HEntity>, kind: crate::constraint::ConstraintKind) -> HConstraint {
        crate::constraint::add_constraint(&mut self.tables.constraints, group, workplane, kind)
    }

    /// Runs the whole pipeline (§4.2, §4.6): regenerate every request's
    /// entities/params from scratch, then solve and sweep each group in
    /// declared order, combining solids as it goes. `RegenConfig`'s chord
    /// tolerances govern only the downstream PWL tessellation (export,
    /// display) that consumes this call's exact BRep output; the
    /// solve/sweep pipeline itself works in exact symbolic/analytic
    /// geometry throughout.
    pub fn regenerate(&mut self, solve: SolveConfig) -> Result<RegenResult, RegenError> {
        self.tables.entities = IdTable::new();
        self.tables.params = ParamTable::new();

        for (h, req) in self.tables.requests.iter() {
            let initial = self.request_initial.get(h).cloned().unwrap_or_default();
            req.generate(&mut self.tables.entities, &mut self.tables.params, &initial);
        }

        let mut running: Option<Solid> = None;
        let mut profiles = HashMap::new();

        for &gh in &self.group_order {
            let is_unknown = {
                let requests = &self.tables.requests;
                move |p: HParam| match p.owner() {
                    Owner::Group(g) => g == gh,
                    Owner::Request(r) => requests.find(r).map(|req| req.group() == gh).unwrap_or(false),
                }
            };
            let outcome = solve_group(gh, &self.tables.entities, &self.tables.constraints, &mut self.tables.params, is_unknown, solve, true);
            match outcome.result {
                SolveResult::TooManyUnknowns => return Err(RegenError::TooManyUnknowns(gh, crate::solver::MAX_UNKNOWNS)),
                SolveResult::DidntConverge => return Err(RegenError::DidntConverge(gh)),
                SolveResult::RedundantDidntConverge => return Err(RegenError::DidntConverge(gh)),
                SolveResult::RedundantOkay if !solve.allow_redundant => {
                    return Err(RegenError::Redundant(gh, outcome.bad_constraints));
                }
                SolveResult::RedundantOkay => {
                    warn!(group = ?gh, bad = ?outcome.bad_constraints, "group is redundantly constrained; allow_redundant set");
                }
                SolveResult::Okay => {}
            }

            refresh_entity_caches(&mut self.tables.entities, &self.tables.params);

            let group_profiles = assemble_profiles(&self.tables.entities, gh);

            let SketchTables { groups, entities, params, .. } = &mut self.tables;
            let group = groups.find_mut(gh).expect("group_order handle must exist in groups table");

            if group.produces_solid() {
                let good: Vec<HEntity> = group_profiles
                    .iter()
                    .find(|p| p.status == ProfileStatus::Good)
                    .map(|p| p.entities.clone())
                    .ok_or_else(|| {
                        let status = group_profiles.first().map(|p| p.status).unwrap_or(ProfileStatus::NotClosed);
                        RegenError::BadProfile(gh, status)
                    })?;
                running = crate::group::regenerate(group, entities, params, &good, running.as_ref());
            } else {
                running = crate::group::regenerate(group, entities, params, &[], running.as_ref());
            }
            profiles.insert(gh, group_profiles);
        }

        self.snapshot_initial_geometry();
        info!(groups = self.group_order.len(), "regenerate: done");
        Ok(RegenResult { solid: running, profiles })
    }

    /// Caches every request's solved geometry as the seed for the next
    /// `regenerate()` call, so dragging or editing a sketch resumes Newton
    /// near the last solution instead of restarting from the initial
    /// placeholder values.
    fn snapshot_initial_geometry(&mut self) {
        let mut points_by_request: HashMap<HRequest, Vec<(f64, f64, f64)>> = HashMap::new();
        for (h, e) in self.tables.entities.iter() {
            if !e.is_point() {
                continue;
            }
            if let Owner::Request(r) = h.owner() {
                let p = e.act_point();
                points_by_request.entry(r).or_default().push((p.x, p.y, p.z));
            }
        }
        for (r, points) in points_by_request {
            self.request_initial.entry(r).or_default().points = points;
        }
    }
}

/// Recomputes every entity's numeric cache (`act_point`/`act_normal`/
/// `act_distance`) from the just-solved param table (§4.6 step 2).
/// Collected into maps first since entity evaluation borrows the whole
/// table immutably while mutation needs `&mut`.
pub fn refresh_entity_caches(entities: &mut IdTable<HEntity, Entity>, params: &ParamTable) {
    let mut points: HashMap<HEntity, Point3> = HashMap::new();
    let mut normals: HashMap<HEntity, Quaternion> = HashMap::new();
    let mut distances: HashMap<HEntity, f64> = HashMap::new();

    for (h, e) in entities.iter() {
        if e.is_point() {
            let v = e.point_get_exprs(entities);
            points.insert(*h, Point3::new(v.x.eval(params, &[]), v.y.eval(params, &[]), v.z.eval(params, &[])));
        } else if e.is_normal() {
            let q = e.normal_get_exprs(entities);
            normals.insert(*h, Quaternion::new(q.w.eval(params, &[]), q.x.eval(params, &[]), q.y.eval(params, &[]), q.z.eval(params, &[])));
        } else if e.is_distance() {
            distances.insert(*h, e.distance_get_expr().eval(params, &[]));
        }
    }

    for (h, e) in entities.iter_mut() {
        if let Some(&p) = points.get(h) {
            e.set_act_point(p);
        }
        if let Some(&n) = normals.get(h) {
            e.set_act_normal(n);
        }
        if let Some(&d) = distances.get(h) {
            e.set_act_distance(d);
        }
    }
}
