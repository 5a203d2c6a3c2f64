//! Tagged component store shared by the steps of one pipeline run.

use ahash::AHashMap;
use std::any::{Any, TypeId};

use warren_common::{Rectangle, WarrenError, WarrenResult};

/// Components are addressed by their type plus an optional tag.
type ComponentKey = (TypeId, Option<String>);

/// Heterogeneous store holding exactly one instance per (type, tag) key.
///
/// A fresh context is created for every pipeline run. Entries are never
/// removed implicitly; they live until the caller drops the context or
/// takes them out with [`GenerationContext::take`].
pub struct GenerationContext {
    /// Map width in cells
    width: usize,
    /// Map height in cells
    height: usize,
    /// Stored components
    components: AHashMap<ComponentKey, Box<dyn Any>>,
}

fn key<T: Any>(tag: Option<&str>) -> ComponentKey {
    (TypeId::of::<T>(), tag.map(str::to_owned))
}

impl GenerationContext {
    /// Creates an empty context for a map of the given size.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            components: AHashMap::new(),
        }
    }

    /// Map width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Map height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Rectangle covering the whole map.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Whether a component of type `T` exists under `tag`.
    #[must_use]
    pub fn contains<T: Any>(&self, tag: Option<&str>) -> bool {
        self.components.contains_key(&key::<T>(tag))
    }

    /// Returns the component for `(T, tag)`, building it with `factory` if absent.
    ///
    /// The factory runs at most once per key for the lifetime of the context.
    pub fn get_or_create<T: Any>(
        &mut self,
        tag: Option<&str>,
        factory: impl FnOnce() -> T,
    ) -> WarrenResult<&mut T> {
        self.components
            .entry(key::<T>(tag))
            .or_insert_with(|| Box::new(factory()))
            .downcast_mut::<T>()
            .ok_or_else(|| WarrenError::missing::<T>(tag))
    }

    /// Returns the component for `(T, tag)` or fails with `MissingComponent`.
    pub fn get<T: Any>(&self, tag: Option<&str>) -> WarrenResult<&T> {
        self.components
            .get(&key::<T>(tag))
            .and_then(|c| c.downcast_ref::<T>())
            .ok_or_else(|| WarrenError::missing::<T>(tag))
    }

    /// Mutable variant of [`GenerationContext::get`].
    pub fn get_mut<T: Any>(&mut self, tag: Option<&str>) -> WarrenResult<&mut T> {
        self.components
            .get_mut(&key::<T>(tag))
            .and_then(|c| c.downcast_mut::<T>())
            .ok_or_else(|| WarrenError::missing::<T>(tag))
    }

    /// Stores `value` under `(T, tag)`, returning the instance it replaced.
    pub fn insert<T: Any>(&mut self, tag: Option<&str>, value: T) -> Option<T> {
        self.components
            .insert(key::<T>(tag), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Removes and returns the component for `(T, tag)`.
    ///
    /// Intended for callers extracting the finished artifact after a run.
    pub fn take<T: Any>(&mut self, tag: Option<&str>) -> WarrenResult<T> {
        self.components
            .remove(&key::<T>(tag))
            .and_then(|c| c.downcast::<T>().ok())
            .map(|c| *c)
            .ok_or_else(|| WarrenError::missing::<T>(tag))
    }
}

impl std::fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("components", &self.components.len())
            .finish()
    }
}
