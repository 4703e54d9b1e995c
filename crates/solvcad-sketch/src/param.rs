//! One scalar unknown (`spec.md` §3.2) and the table that owns every param
//! in a sketch.

use solvcad_expr::ParamLookup;
use solvcad_ids::{HParam, IdTable, Owner};

/// A single solver unknown.
#[derive(Clone, Copy, Debug)]
pub struct Param {
    handle: HParam,
    value: f64,
    /// Set once the solver has written a value into this param.
    known: bool,
    /// Set during degree-of-freedom analysis: `true` iff nothing pins this
    /// param down, i.e. it could move without violating any constraint.
    free: bool,
    /// Set while the user is interactively dragging this param; the solver
    /// weights dragged columns lightly (§4.5 step 5) so nearby params
    /// absorb the change instead of fighting it.
    dragged: bool,
    /// If `Some`, this param was unified with another during substitution
    /// (§4.5 step 2) and its value always mirrors the target's.
    substituted_into: Option<HParam>,
}

impl Param {
    pub fn new(handle: HParam, value: f64) -> Self {
        Param { handle, value, known: false, free: false, dragged: false, substituted_into: None }
    }

    pub fn handle(&self) -> HParam { self.handle }
    pub fn value(&self) -> f64 { self.value }
    pub fn set_value(&mut self, v: f64) { self.value = v; self.known = true; }
    pub fn known(&self) -> bool { self.known }
    pub fn free(&self) -> bool { self.free }
    pub fn set_free(&mut self, free: bool) { self.free = free; }
    pub fn dragged(&self) -> bool { self.dragged }
    pub fn set_dragged(&mut self, dragged: bool) { self.dragged = dragged; }
    pub fn substituted_into(&self) -> Option<HParam> { self.substituted_into }
    pub fn set_substituted_into(&mut self, target: Option<HParam>) { self.substituted_into = target; }
    pub fn is_substituted(&self) -> bool { self.substituted_into.is_some() }
}

/// The handle-keyed table of every param owned by a sketch's requests and
/// groups, in insertion order (§4.2).
#[derive(Clone, Debug, Default)]
pub struct ParamTable {
    table: IdTable<HParam, Param>,
}

impl ParamTable {
    pub fn new() -> Self { ParamTable { table: IdTable::new() } }

    /// Adds a fresh param owned by `owner`, with initial value `value`.
    pub fn add(&mut self, owner: Owner, value: f64) -> HParam {
        self.table.add(owner, |h| Param::new(h, value))
    }

    pub fn get(&self, h: HParam) -> Option<&Param> { self.table.find(h) }
    pub fn get_mut(&mut self, h: HParam) -> Option<&mut Param> { self.table.find_mut(h) }
    pub fn value(&self, h: HParam) -> f64 { self.table.find(h).map(|p| p.value()).unwrap_or(0.0) }

    pub fn iter(&self) -> impl Iterator<Item = &Param> { self.table.iter().map(|(_, p)| p) }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Param> { self.table.iter_mut().map(|(_, p)| p) }
    pub fn len(&self) -> usize { self.table.len() }
    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    pub fn tag(&mut self, h: HParam) { self.table.tag(h); }
    pub fn clear_tags(&mut self) { self.table.clear_tags(); }
    pub fn sweep(&mut self) { self.table.sweep(); }
}

/// Resolves an [`HParam`] to its live value through a [`ParamTable`]; the
/// bridge `solvcad-expr`'s `Expr::eval` uses so that the expression crate
/// never depends on the sketch data model.
impl ParamLookup for ParamTable {
    fn value(&self, p: HParam) -> Option<f64> { self.table.find(p).map(|param| param.value()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvcad_ids::HGroup;

    #[test]
    fn add_and_read_back_value() {
        let mut t = ParamTable::new();
        let h = t.add(Owner::Group(HGroup::from_index(1)), 3.5);
        assert_eq!(t.value(h), 3.5);
        assert!(!t.get(h).unwrap().known());
    }

    #[test]
    fn set_value_marks_known() {
        let mut t = ParamTable::new();
        let h = t.add(Owner::Group(HGroup::from_index(1)), 0.0);
        t.get_mut(h).unwrap().set_value(2.0);
        assert!(t.get(h).unwrap().known());
        assert_eq!(t.value(h), 2.0);
    }
}
