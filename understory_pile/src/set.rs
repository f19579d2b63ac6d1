// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pile set and its per-frame maintenance.
//!
//! ## Passes
//!
//! [`PileSet::maintain`] runs, in order:
//!
//! 0. Reconcile: members that left the frame (or died) are removed and every pile
//!    re-reads its rectangles.
//! 1. Lighten: healthy singletons dissolve, members split off from the dominant
//!    touching group are evicted, and piles below the destruction density shed
//!    their worst member until they recover.
//! 2. Grow: unpiled entities join the touching pile whose density they raise most,
//!    provided the result exceeds the creation density.
//! 3. Create: low-priority entities get a singleton pile; other unpiled entities
//!    pair up with the first unpiled partner dense enough.
//! 4. Merge: touching piles whose combined density reaches the creation density fuse.
//!
//! All shrinking happens before any growth, so one frame never both breaks and
//! forms the same pairing. Passes 2–4 repeat until a round changes nothing, which
//! makes a second call over an unchanged frame a no-op.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;
use tracing::{debug, trace};

use crate::config::PileConfig;
use crate::entity::{EntityFrame, EntitySnapshot};
use crate::geometry::{dominant_group, merge_touching, pair_density, touches};
use crate::pile::Pile;

/// Generational handle of a pile in a [`PileSet`].
///
/// A destroyed pile's slot may be reused; the generation then changes, so a stale
/// `PileId` never refers to the newer pile.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PileId(u32, u32);

impl PileId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Summary of what one [`PileSet::maintain`] call changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MaintainStats {
    /// Members removed because they left the frame or died.
    pub dropped: usize,
    /// Piles destroyed by reconciliation or lightening.
    pub dissolved: usize,
    /// Members evicted while lightening.
    pub evicted: usize,
    /// Unpiled entities that joined an existing pile.
    pub joined: usize,
    /// Piles created.
    pub created: usize,
    /// Pile pairs fused into one.
    pub merged: usize,
}

impl MaintainStats {
    /// True if the pass left every pile untouched.
    pub fn is_quiet(&self) -> bool {
        *self == Self::default()
    }
}

/// The live piles of one widget plus the entity→pile membership map.
///
/// Membership is a partial function: an entity is in at most one pile, and a pile
/// with no members is destroyed immediately.
#[derive(Clone)]
pub struct PileSet<K> {
    config: PileConfig,
    slots: Vec<Option<Pile<K>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    order: Vec<PileId>, // live piles in creation order
    membership: HashMap<K, PileId>,
}

impl<K> Debug for PileSet<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PileSet")
            .field("config", &self.config)
            .field("piles", &self.order.len())
            .field("piled_entities", &self.membership.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash + Debug> Default for PileSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> PileSet<K> {
    /// Create an empty set with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(PileConfig::default())
    }

    /// Create an empty set with explicit thresholds.
    ///
    /// # Panics
    ///
    /// Panics if `creation_density <= destruction_density`.
    pub fn with_config(config: PileConfig) -> Self {
        assert!(
            config.is_valid(),
            "creation density ({}) must exceed destruction density ({})",
            config.creation_density,
            config.destruction_density
        );
        Self {
            config,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            membership: HashMap::new(),
        }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &PileConfig {
        &self.config
    }

    /// Number of live piles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no piles.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a pile; `None` if the handle is stale.
    pub fn get(&self, id: PileId) -> Option<&Pile<K>> {
        let pile = self.slots.get(id.idx())?.as_ref()?;
        (self.generations[id.idx()] == id.1).then_some(pile)
    }

    /// Live piles in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PileId, &Pile<K>)> + '_ {
        self.order.iter().map(|&id| (id, self.pile(id)))
    }

    /// The pile holding `entity`, if any.
    pub fn pile_of(&self, entity: &K) -> Option<PileId> {
        self.membership.get(entity).copied()
    }

    /// Whether `entity` is in some pile.
    pub fn contains_entity(&self, entity: &K) -> bool {
        self.membership.contains_key(entity)
    }

    /// Remove an entity from its pile right away, destroying the pile if it empties.
    ///
    /// Returns `false` if the entity was not piled. Entities that simply disappear
    /// from the frame are handled by the next [`maintain`](Self::maintain) instead.
    pub fn unregister(&mut self, entity: &K) -> bool {
        let Some(pile) = self.pile_of(entity) else {
            return false;
        };
        if self.detach(entity) {
            debug!(?pile, ?entity, "pile dissolved on unregister");
        }
        true
    }

    /// Run one frame of maintenance over `frame`.
    pub fn maintain(&mut self, frame: &EntityFrame<'_, K>) -> MaintainStats {
        let mut stats = MaintainStats::default();

        self.reconcile(frame, &mut stats);

        // Shrink every pile on this frame's rectangles before anything grows.
        let piles = self.order.clone();
        for id in piles {
            if self.get(id).is_some() {
                self.lighten(id, frame, &mut stats);
            }
        }

        // Each changing round removes at least one unpiled entity or one pile.
        loop {
            let before = stats;
            self.grow(frame, &mut stats);
            self.create(frame, &mut stats);
            self.merge(&mut stats);
            if stats == before {
                break;
            }
        }

        if !stats.is_quiet() {
            trace!(?stats, piles = self.order.len(), "piles maintained");
        }
        stats
    }

    fn reconcile(&mut self, frame: &EntityFrame<'_, K>, stats: &mut MaintainStats) {
        let stale: Vec<K> = self
            .iter()
            .flat_map(|(_, pile)| pile.members())
            .filter(|k| !frame.is_live(k))
            .collect();
        for entity in stale {
            stats.dropped += 1;
            if self.detach(&entity) {
                stats.dissolved += 1;
                debug!(?entity, "pile dissolved after its last member left");
            }
        }

        for i in 0..self.order.len() {
            let id = self.order[i];
            self.pile_mut(id)
                .refresh(|k| frame.get(k).map(|e| e.bounds));
        }
    }

    fn lighten(&mut self, id: PileId, frame: &EntityFrame<'_, K>, stats: &mut MaintainStats) {
        if self.dissolve_healthy_singleton(id, frame, stats) {
            return;
        }

        // Evicting a member can split the rest apart, so alternate until both hold.
        while self.pile(id).len() > 1 {
            if self.evict_strays(id, stats) {
                continue;
            }
            let pile = self.pile(id);
            if pile.density() >= self.config.destruction_density {
                break;
            }
            // Greedy: drop whichever member leaves the densest remainder.
            let mut worst: Option<(K, f64)> = None;
            for entity in pile.members() {
                let remaining = pile.density_without(&entity);
                match worst {
                    Some((_, best)) if best >= remaining => {}
                    _ => worst = Some((entity, remaining)),
                }
            }
            let Some((entity, _)) = worst else {
                break;
            };
            self.evict(id, entity, stats);
        }

        self.dissolve_healthy_singleton(id, frame, stats);
    }

    /// Evict members outside the dominant touching group. Returns true if any left.
    fn evict_strays(&mut self, id: PileId, stats: &mut MaintainStats) -> bool {
        let entries: Vec<(K, Rect)> = self.pile(id).entries().collect();
        let rects: Vec<Rect> = entries.iter().map(|&(_, r)| r).collect();
        let groups = merge_touching(&rects);
        if groups.len() <= 1 {
            return false;
        }
        let Some(dominant) = dominant_group(&groups) else {
            return false;
        };
        let keep = groups[dominant].bounds;
        let mut evicted = false;
        for (entity, bounds) in entries {
            if !touches(keep, bounds) {
                self.evict(id, entity, stats);
                evicted = true;
            }
        }
        evicted
    }

    fn dissolve_healthy_singleton(
        &mut self,
        id: PileId,
        frame: &EntityFrame<'_, K>,
        stats: &mut MaintainStats,
    ) -> bool {
        let pile = self.pile(id);
        if pile.len() != 1 {
            return false;
        }
        let Some(entity) = pile.members().next() else {
            return false;
        };
        let healthy = frame
            .get(&entity)
            .is_some_and(|e| e.priority >= self.config.healthy_priority);
        if !healthy {
            return false;
        }
        self.detach(&entity);
        stats.dissolved += 1;
        debug!(pile = ?id, ?entity, "singleton pile dissolved");
        true
    }

    fn evict(&mut self, id: PileId, entity: K, stats: &mut MaintainStats) {
        if self.detach(&entity) {
            stats.dissolved += 1;
        }
        stats.evicted += 1;
        trace!(pile = ?id, ?entity, "member evicted");
    }

    fn grow(&mut self, frame: &EntityFrame<'_, K>, stats: &mut MaintainStats) {
        for e in frame.entities() {
            if !self.is_unpiled(e) {
                continue;
            }
            // Only piles the entity makes strictly denser are candidates.
            let mut best: Option<PileId> = None;
            let mut best_gain = 0.0;
            for &id in &self.order {
                let pile = self.pile(id);
                if !touches(pile.bounds(), e.bounds) {
                    continue;
                }
                let with = pile.density_with(e.bounds);
                if with <= self.config.creation_density {
                    continue;
                }
                let gain = with - pile.density();
                if gain > best_gain {
                    best = Some(id);
                    best_gain = gain;
                }
            }
            if let Some(id) = best {
                self.assign(e.id, e.bounds, id);
                stats.joined += 1;
                trace!(pile = ?id, entity = ?e.id, "entity joined pile");
            }
        }
    }

    fn create(&mut self, frame: &EntityFrame<'_, K>, stats: &mut MaintainStats) {
        let entities = frame.entities();
        for (i, a) in entities.iter().enumerate() {
            if !self.is_unpiled(a) {
                continue;
            }

            if a.priority < self.config.healthy_priority {
                let id = self.create_pile();
                self.assign(a.id, a.bounds, id);
                stats.created += 1;
                debug!(pile = ?id, entity = ?a.id, "singleton pile created");
                continue;
            }

            let partner = entities.iter().enumerate().find(|&(j, b)| {
                j != i
                    && self.is_unpiled(b)
                    && pair_density(a.bounds, b.bounds) > self.config.creation_density
            });
            if let Some((_, b)) = partner {
                let id = self.create_pile();
                self.assign(a.id, a.bounds, id);
                self.assign(b.id, b.bounds, id);
                stats.created += 1;
                debug!(pile = ?id, first = ?a.id, second = ?b.id, "pile created");
            }
        }
    }

    fn merge(&mut self, stats: &mut MaintainStats) {
        // Merging shifts indices, so rescan from the start after every merge.
        'rescan: loop {
            for i in 0..self.order.len() {
                for j in (i + 1)..self.order.len() {
                    let (into, from) = (self.order[i], self.order[j]);
                    let (a, b) = (self.pile(into), self.pile(from));
                    if !touches(a.bounds(), b.bounds())
                        || Pile::merge_density(a, b) < self.config.creation_density
                    {
                        continue;
                    }
                    let moved: Vec<(K, Rect)> = b.entries().collect();
                    for (entity, bounds) in moved {
                        self.assign(entity, bounds, into);
                    }
                    stats.merged += 1;
                    debug!(?into, ?from, "piles merged");
                    continue 'rescan;
                }
            }
            break;
        }
    }

    fn is_unpiled(&self, e: &EntitySnapshot<K>) -> bool {
        e.alive && !self.membership.contains_key(&e.id)
    }

    fn assign(&mut self, entity: K, bounds: Rect, pile: PileId) {
        match self.pile_of(&entity) {
            Some(prev) if prev == pile => return,
            Some(_) => {
                self.detach(&entity);
            }
            None => {}
        }
        self.membership.insert(entity, pile);
        self.pile_mut(pile).add_member(entity, bounds);
    }

    /// Remove `entity` from its pile. Returns true if that destroyed the pile.
    fn detach(&mut self, entity: &K) -> bool {
        let Some(id) = self.membership.remove(entity) else {
            return false;
        };
        let pile = self.pile_mut(id);
        pile.remove_member(entity);
        if pile.is_empty() {
            self.destroy_pile(id);
            return true;
        }
        false
    }

    fn create_pile(&mut self) -> PileId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            self.slots[idx] = Some(Pile::new());
            idx
        } else {
            self.slots.push(Some(Pile::new()));
            self.generations.push(1);
            self.slots.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "PileId uses 32-bit indices by design."
        )]
        let id = PileId::new(idx as u32, self.generations[idx]);
        self.order.push(id);
        id
    }

    fn destroy_pile(&mut self, id: PileId) {
        debug_assert!(
            self.pile(id).is_empty(),
            "only empty piles are destroyed"
        );
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
        self.order.retain(|&p| p != id);
    }

    fn pile(&self, id: PileId) -> &Pile<K> {
        self.slots[id.idx()].as_ref().expect("dangling PileId")
    }

    fn pile_mut(&mut self, id: PileId) -> &mut Pile<K> {
        self.slots[id.idx()].as_mut().expect("dangling PileId")
    }
}
