//! Sparse-set storage of the components of one type.

use crate::scene::{Component, Entity};
use std::any::Any;

/// Components of one type, packed densely with a sparse lookup table from
/// entity index to position in the packed arrays.
#[derive(Debug)]
pub(crate) struct SparseSet<C> {
    sparse: Vec<Option<usize>>,
    entities: Vec<Entity>,
    components: Vec<C>,
}

/// Type-erased access to a [`SparseSet`], for operations that do not need to
/// know the component type.
pub(crate) trait ComponentStorage: Any + Send + Sync {
    /// Removes the component of the given entity, if it has one.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> SparseSet<C> {
    pub(crate) fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            components: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.components.len()
    }

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let idx = (*self.sparse.get(entity.index())?)?;
        (self.entities[idx] == entity).then_some(idx)
    }

    pub(crate) fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    pub(crate) fn get(&self, entity: Entity) -> Option<&C> {
        self.dense_index(entity).map(|idx| &self.components[idx])
    }

    pub(crate) fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let idx = self.dense_index(entity)?;
        Some(&mut self.components[idx])
    }

    /// Inserts the component, replacing and returning any existing component
    /// of the entity.
    pub(crate) fn insert(&mut self, entity: Entity, component: C) -> &mut C {
        if let Some(idx) = self.dense_index(entity) {
            self.components[idx] = component;
            return &mut self.components[idx];
        }
        let sparse_idx = entity.index();
        if sparse_idx >= self.sparse.len() {
            self.sparse.resize(sparse_idx + 1, None);
        }
        self.sparse[sparse_idx] = Some(self.components.len());
        self.entities.push(entity);
        self.components.push(component);
        let last = self.components.len() - 1;
        &mut self.components[last]
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> Option<C> {
        let idx = self.dense_index(entity)?;
        self.sparse[entity.index()] = None;
        self.entities.swap_remove(idx);
        let component = self.components.swap_remove(idx);
        if let Some(&moved) = self.entities.get(idx) {
            self.sparse[moved.index()] = Some(idx);
        }
        Some(component)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.entities.iter().copied().zip(&self.components)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> {
        self.entities.iter().copied().zip(&mut self.components)
    }
}

impl<C: Component> ComponentStorage for SparseSet<C> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
