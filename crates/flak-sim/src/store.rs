//! Entity store: typed ownership of live enemies, projectiles and targets.
//!
//! Backed by a hecs `World`. Each entity carries an [`EntityId`] component
//! next to exactly one of [`Enemy`], [`Projectile`] or [`Target`]. Ids are
//! monotonic and survive `clear`, so they are never reused.
//!
//! Insertion is O(1); removal by id is a linear scan, which is fine for the
//! tens of entities a session holds. Systems never remove while iterating:
//! they read a snapshot (`enemies()`, `projectiles()`, …) or collect ids into
//! a buffer first and remove afterwards.

use hecs::{Component, World};

use flak_core::components::{Enemy, Projectile, Target};
use flak_core::types::EntityId;

#[derive(Default)]
pub struct EntityStore {
    world: World,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_enemy(&mut self, enemy: Enemy) -> EntityId {
        self.insert(enemy)
    }

    pub fn insert_projectile(&mut self, projectile: Projectile) -> EntityId {
        self.insert(projectile)
    }

    pub fn insert_target(&mut self, target: Target) -> EntityId {
        self.insert(target)
    }

    /// Remove an enemy, returning it. `None` if it is already gone.
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        self.remove(id)
    }

    /// Remove a projectile, returning it so the caller can release its body.
    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        self.remove(id)
    }

    pub fn enemy(&self, id: EntityId) -> Option<Enemy> {
        self.find(id)
    }

    pub fn projectile(&self, id: EntityId) -> Option<Projectile> {
        self.find(id)
    }

    pub fn target(&self, id: EntityId) -> Option<Target> {
        self.find(id)
    }

    /// Snapshot of live enemies, ordered by id (spawn order).
    pub fn enemies(&self) -> Vec<(EntityId, Enemy)> {
        self.snapshot()
    }

    /// Snapshot of live projectiles, ordered by id (fire order).
    pub fn projectiles(&self) -> Vec<(EntityId, Projectile)> {
        self.snapshot()
    }

    /// Snapshot of practice targets, ordered by id.
    pub fn targets(&self) -> Vec<(EntityId, Target)> {
        self.snapshot()
    }

    pub fn enemy_count(&self) -> usize {
        self.count::<Enemy>()
    }

    pub fn projectile_count(&self) -> usize {
        self.count::<Projectile>()
    }

    pub fn target_count(&self) -> usize {
        self.count::<Target>()
    }

    pub fn targets_hit(&self) -> usize {
        let mut query = self.world.query::<&Target>();
        query.iter().filter(|(_entity, target)| target.hit).count()
    }

    /// Flip a target to hit. Returns `false` if it was already hit or missing,
    /// so a target can only ever be scored once.
    pub fn mark_target_hit(&mut self, id: EntityId) -> bool {
        for (_entity, (eid, target)) in self.world.query_mut::<(&EntityId, &mut Target)>() {
            if *eid == id {
                if target.hit {
                    return false;
                }
                target.hit = true;
                return true;
            }
        }
        false
    }

    /// Mutable access to every enemy, for in-place integration.
    pub fn for_each_enemy_mut(&mut self, mut f: impl FnMut(EntityId, &mut Enemy)) {
        for (_entity, (id, enemy)) in self.world.query_mut::<(&EntityId, &mut Enemy)>() {
            f(*id, enemy);
        }
    }

    /// Mutable access to every projectile, for syncing from physics.
    pub fn for_each_projectile_mut(&mut self, mut f: impl FnMut(EntityId, &mut Projectile)) {
        for (_entity, (id, projectile)) in self.world.query_mut::<(&EntityId, &mut Projectile)>()
        {
            f(*id, projectile);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    /// Drop every entity. Callers must release external resources
    /// (physics bodies, visuals) before calling this.
    pub fn clear(&mut self) {
        self.world.clear();
    }

    fn insert<T: Component>(&mut self, component: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.world.spawn((id, component));
        id
    }

    fn remove<T: Component + Copy>(&mut self, id: EntityId) -> Option<T> {
        let (entity, value) = self
            .world
            .query_mut::<(&EntityId, &T)>()
            .into_iter()
            .find(|(_entity, (eid, _))| **eid == id)
            .map(|(entity, (_, value))| (entity, *value))?;
        let _ = self.world.despawn(entity);
        Some(value)
    }

    fn find<T: Component + Copy>(&self, id: EntityId) -> Option<T> {
        let mut query = self.world.query::<(&EntityId, &T)>();
        query
            .iter()
            .find(|(_entity, (eid, _))| **eid == id)
            .map(|(_entity, (_, value))| *value)
    }

    fn snapshot<T: Component + Copy>(&self) -> Vec<(EntityId, T)> {
        let mut query = self.world.query::<(&EntityId, &T)>();
        let mut items: Vec<(EntityId, T)> = query
            .iter()
            .map(|(_entity, (id, value))| (*id, *value))
            .collect();
        items.sort_unstable_by_key(|(id, _)| *id);
        items
    }

    fn count<T: Component>(&self) -> usize {
        let mut query = self.world.query::<&T>();
        query.iter().count()
    }
}
