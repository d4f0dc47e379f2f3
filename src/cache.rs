//! Projected hot-zone table, rebuilt as a whole whenever the layout changes.

use std::collections::BTreeMap;

use crate::geometry::{project_region, AnswerRegion, Layout, ScaledRegion};

/// A layout together with every region projected through it.
///
/// Both halves are produced by one call and stored by one assignment, so a
/// reader never sees a new layout next to stale regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    layout: Layout,
    regions: BTreeMap<usize, ScaledRegion>,
}

impl Projection {
    pub fn build(layout: Layout, regions: &[AnswerRegion]) -> Self {
        let regions = regions
            .iter()
            .map(|r| (r.index, project_region(r, &layout)))
            .collect();
        Self { layout, regions }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn get(&self, index: usize) -> Option<&ScaledRegion> {
        self.regions.get(&index)
    }

    /// Regions in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ScaledRegion)> {
        self.regions.iter().map(|(i, r)| (*i, r))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Topmost region under a screen point. Later indices are drawn on top.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.regions
            .iter()
            .rev()
            .find(|(_, r)| r.contains(x, y))
            .map(|(i, _)| *i)
    }
}

/// Owned cache of the current [`Projection`], one per player instance.
#[derive(Debug, Default, Clone)]
pub struct RegionCache {
    current: Option<Projection>,
}

impl RegionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole table. Returns `false` when `layout` matches the
    /// cached one and nothing was rebuilt.
    pub fn rebuild(&mut self, layout: Layout, regions: &[AnswerRegion]) -> bool {
        if self.current.as_ref().is_some_and(|p| p.layout == layout) {
            return false;
        }
        let projection = Projection::build(layout, regions);
        log::debug!("projected {} regions", projection.len());
        self.current = Some(projection);
        true
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.current.as_ref()
    }

    pub fn get(&self, index: usize) -> Option<&ScaledRegion> {
        self.current.as_ref().and_then(|p| p.get(index))
    }

    pub fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}
