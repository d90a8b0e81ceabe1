//! Game entity system with simple integer IDs

use crate::{GameError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Simple integer ID for game entities, tagged with the entity type
///
/// All entity kinds draw from one counter, so a `CardId` and a `PlayerId`
/// never share a number. IDs are stable throughout a game.
pub struct EntityId<T> {
    id: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub fn new(id: u32) -> Self {
        EntityId {
            id,
            _marker: PhantomData,
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.id
    }
}

// Manual impls so the marker type needs no bounds
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.id)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u32::deserialize(deserializer).map(EntityId::new)
    }
}

/// Base trait for all game entities
pub trait GameEntity<T> {
    fn id(&self) -> EntityId<T>;
    fn name(&self) -> &str;
}

/// Reference to anything that can act as the source of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Game,
    Player(super::PlayerId),
    Card(super::CardId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Game => write!(f, "Game"),
            EntityRef::Player(id) => write!(f, "Player({id})"),
            EntityRef::Card(id) => write!(f, "Card({id})"),
        }
    }
}

impl From<super::PlayerId> for EntityRef {
    fn from(id: super::PlayerId) -> Self {
        EntityRef::Player(id)
    }
}

impl From<super::CardId> for EntityRef {
    fn from(id: super::CardId) -> Self {
        EntityRef::Card(id)
    }
}

/// Central storage for all game entities
///
/// Provides fast lookup by EntityId and manages entity lifecycle.
/// Uses FxHashMap for fast hashing of integer keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T> {
    entities: FxHashMap<EntityId<T>, T>,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: FxHashMap::default(),
        }
    }

    /// Insert an entity with a specific ID
    pub fn insert(&mut self, id: EntityId<T>, entity: T) {
        self.entities.insert(id, entity);
    }

    /// Get an entity by ID
    pub fn get(&self, id: EntityId<T>) -> Result<&T> {
        self.entities
            .get(&id)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    /// Get a mutable reference to an entity
    pub fn get_mut(&mut self, id: EntityId<T>) -> Result<&mut T> {
        self.entities
            .get_mut(&id)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.entities.contains_key(&id)
    }

    /// Iterate over all entities (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId<T>, &T)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity registry for every entity the engine instantiates
///
/// Registration order is kept so hosts can replay entity creation.
#[derive(Debug, Clone, Default)]
pub struct EntityManager {
    registered: FxHashMap<EntityRef, usize>,
    order: Vec<EntityRef>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new entity, returning its registration index
    ///
    /// Registering the same entity twice returns the original index.
    pub fn new_entity(&mut self, entity: EntityRef) -> usize {
        if let Some(&idx) = self.registered.get(&entity) {
            return idx;
        }
        let idx = self.order.len();
        self.registered.insert(entity, idx);
        self.order.push(entity);
        idx
    }

    pub fn is_tracked(&self, entity: EntityRef) -> bool {
        self.registered.contains_key(&entity)
    }

    /// Fail with `UntrackedEntity` unless the entity was registered
    pub fn ensure_tracked(&self, entity: EntityRef) -> Result<()> {
        if self.is_tracked(entity) {
            Ok(())
        } else {
            Err(GameError::UntrackedEntity(entity.to_string()))
        }
    }

    /// Registered entities in registration order
    pub fn iter(&self) -> impl Iterator<Item = EntityRef> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
