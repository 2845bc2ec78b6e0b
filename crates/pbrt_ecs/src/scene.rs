//! Registry of entities and their components.

use crate::storage::{ComponentStorage, SparseSet};
use anyhow::{Result, anyhow};
use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    fmt,
};

/// Anything that can be attached to an [`Entity`] in a [`Scene`].
pub trait Component: 'static + Send + Sync {}

impl<T: 'static + Send + Sync> Component for T {}

/// Handle to an entity in a [`Scene`].
///
/// The handle pairs a slot index with the generation of the slot, so a handle
/// to a destroyed entity stays invalid after its slot has been reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

/// Owner of all entities and their components.
///
/// Each component type is stored in its own sparse set. Operations that are
/// given an invalid entity or a missing component log the problem at error
/// level and return an error.
#[derive(Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    entity_count: usize,
    storages: HashMap<TypeId, Box<dyn ComponentStorage>>,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    generation: u32,
    alive: bool,
}

impl Entity {
    pub(crate) const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Logs the message at error level and returns it as an error.
fn new_slot_index(slot_count: usize) -> u32 {
    u32::try_from(slot_count).expect("entity count exceeds u32::MAX")
}

fn logged_error<T>(message: String) -> Result<T> {
    log::error!("{message}");
    Err(anyhow!(message))
}

impl Scene {
    /// Creates a new scene with no entities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new entity without components, reusing the slot of a
    /// destroyed entity if there is one.
    ///
    /// # Panics
    /// If the scene already holds `u32::MAX + 1` entity slots.
    pub fn create_entity(&mut self) -> Entity {
        self.entity_count += 1;
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            return Entity::from_raw_parts(index, slot.generation);
        }
        let index = new_slot_index(self.slots.len());
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        Entity::from_raw_parts(index, 0)
    }

    /// Removes the given entity and all of its components.
    ///
    /// # Errors
    /// Returns an error if the entity is not valid.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        if !self.is_valid(entity) {
            return logged_error(format!("Cannot destroy {entity}: entity is not valid"));
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        let slot = &mut self.slots[entity.index()];
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(entity.index);
        self.entity_count -= 1;
        Ok(())
    }

    /// Whether the entity has been created and not yet destroyed.
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index())
            .is_some_and(|slot| slot.alive && slot.generation == entity.generation)
    }

    /// Returns the current number of entities.
    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Returns the number of entities that have a component of type `C`.
    pub fn component_count<C: Component>(&self) -> usize {
        self.storage::<C>().map_or(0, SparseSet::len)
    }

    /// Attaches the given component to the entity and returns a reference to
    /// it in the scene.
    ///
    /// # Errors
    /// Returns an error if the entity is not valid or already has a
    /// component of type `C`.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<&mut C> {
        self.check_valid(entity)?;
        if self.storage::<C>().is_some_and(|storage| storage.contains(entity)) {
            return logged_error(format!(
                "{entity} already has a component of type {}",
                type_name::<C>()
            ));
        }
        Ok(self.storage_or_insert::<C>()?.insert(entity, component))
    }

    /// Returns a reference to the entity's component of type `C`.
    ///
    /// # Errors
    /// Returns an error if the entity is not valid or has no component of
    /// type `C`.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.check_valid(entity)?;
        match self.storage::<C>().and_then(|storage| storage.get(entity)) {
            Some(component) => Ok(component),
            None => logged_error(Self::missing_component_message::<C>(entity)),
        }
    }

    /// Returns a mutable reference to the entity's component of type `C`.
    ///
    /// # Errors
    /// Returns an error if the entity is not valid or has no component of
    /// type `C`.
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.check_valid(entity)?;
        match self
            .storage_mut::<C>()
            .and_then(|storage| storage.get_mut(entity))
        {
            Some(component) => Ok(component),
            None => logged_error(Self::missing_component_message::<C>(entity)),
        }
    }

    /// Whether the entity has a component of type `C`. Invalid entities are
    /// logged and have no components.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.check_valid(entity).is_ok()
            && self
                .storage::<C>()
                .is_some_and(|storage| storage.contains(entity))
    }

    /// Detaches the entity's component of type `C` and returns it.
    ///
    /// # Errors
    /// Returns an error if the entity is not valid or has no component of
    /// type `C`.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.check_valid(entity)?;
        match self
            .storage_mut::<C>()
            .and_then(|storage| storage.remove(entity))
        {
            Some(component) => Ok(component),
            None => logged_error(Self::missing_component_message::<C>(entity)),
        }
    }

    /// Iterates over all entities with a component of type `C`, in no
    /// particular order.
    pub fn view<C: Component>(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.storage::<C>()
            .into_iter()
            .flat_map(|storage| storage.iter())
    }

    /// Iterates mutably over all entities with a component of type `C`, in
    /// no particular order.
    pub fn view_mut<C: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.storage_mut::<C>()
            .into_iter()
            .flat_map(|storage| storage.iter_mut())
    }

    /// Iterates over all entities with components of both type `A` and type
    /// `B`, in no particular order.
    pub fn view2<A: Component, B: Component>(&self) -> impl Iterator<Item = (Entity, &A, &B)> {
        let other = self.storage::<B>();
        self.view::<A>().filter_map(move |(entity, a)| {
            let b = other?.get(entity)?;
            Some((entity, a, b))
        })
    }

    fn check_valid(&self, entity: Entity) -> Result<()> {
        if self.is_valid(entity) {
            Ok(())
        } else {
            logged_error(format!("{entity} is not valid"))
        }
    }

    fn missing_component_message<C: Component>(entity: Entity) -> String {
        format!("{entity} does not have a component of type {}", type_name::<C>())
    }

    fn storage<C: Component>(&self) -> Option<&SparseSet<C>> {
        self.storages
            .get(&TypeId::of::<C>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut<C: Component>(&mut self) -> Option<&mut SparseSet<C>> {
        self.storages
            .get_mut(&TypeId::of::<C>())
            .and_then(|storage| storage.as_any_mut().downcast_mut())
    }

    fn storage_or_insert<C: Component>(&mut self) -> Result<&mut SparseSet<C>> {
        self.storages
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(SparseSet::<C>::new()))
            .as_any_mut()
            .downcast_mut()
            .ok_or_else(|| anyhow!("Storage for {} has the wrong type", type_name::<C>()))
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("entity_count", &self.entity_count)
            .field("component_types", &self.storages.len())
            .finish()
    }
}
