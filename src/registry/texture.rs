//! Placed frame instances, addressed by opaque handles.

use log::warn;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::composition::Order;
use crate::error::ErrorKind;
use crate::sprite::Frame;

use super::traits::Registry;

/// Error when operating on a texture handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A null handle or an absent frame was passed
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The handle is unknown or was already invalidated
    #[error("texture {0} is not registered")]
    Corrupted(TextureHandle),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidInput(_) => ErrorKind::InvalidInput,
            RegistryError::Corrupted(_) => ErrorKind::Corrupted,
        }
    }
}

/// Opaque 128-bit texture identity.
///
/// Two handles are equal when they carry the same identity, however they
/// were obtained. The nil value is the null handle and is never minted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(Uuid);

impl TextureHandle {
    /// The null handle
    pub const NULL: TextureHandle = TextureHandle(Uuid::nil());

    fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rebuild a handle from its 128-bit value.
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }

    /// Whether both handles carry the same identity.
    pub fn is_equal(lhs: &TextureHandle, rhs: &TextureHandle) -> bool {
        lhs.0 == rhs.0
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle({})", self.0)
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a texture is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Off,
    On,
}

impl Visibility {
    pub fn is_on(self) -> bool {
        self == Visibility::On
    }
}

/// A position in world pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Coarse cell coordinates used to order textures within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridIndexes {
    pub x: i32,
    pub y: i32,
}

/// A frame placed in the world.
#[derive(Debug, Clone)]
pub struct Texture {
    pub frame: Arc<Frame>,
    pub origin: Point,
    pub grid: GridIndexes,
    /// Cell scale reported alongside the grid indexes
    pub grid_scale: u32,
    pub order: Order,
    pub visibility: Visibility,
    /// Registration sequence number, unique within a registry
    pub serial: u64,
}

/// Store of placed textures keyed by handle.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<TextureHandle, Texture>,
    next_serial: u64,
}

impl TextureRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { textures: HashMap::new(), next_serial: 0 }
    }

    /// Register `frame` at origin (0, 0), grid (0, 0) and return its new handle.
    pub fn initialize(
        &mut self,
        frame: Arc<Frame>,
        order: Order,
        visibility: Visibility,
    ) -> TextureHandle {
        let mut handle = TextureHandle::mint();
        while handle.is_null() || self.textures.contains_key(&handle) {
            handle = TextureHandle::mint();
        }

        let texture = Texture {
            frame,
            origin: Point::default(),
            grid: GridIndexes::default(),
            grid_scale: 0,
            order,
            visibility,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.textures.insert(handle, texture);

        handle
    }

    /// Remove the texture behind `handle`. The handle is dead afterwards.
    pub fn invalidate(&mut self, handle: &TextureHandle) -> Result<(), RegistryError> {
        check_not_null(handle)?;
        match self.textures.remove(handle) {
            Some(_) => Ok(()),
            None => {
                warn!("invalidate on unregistered texture {}", handle);
                Err(RegistryError::Corrupted(*handle))
            }
        }
    }

    pub fn set_visibility_and_order(
        &mut self,
        handle: &TextureHandle,
        visibility: Visibility,
        order: Order,
    ) -> Result<(), RegistryError> {
        let texture = self.lookup_mut(handle)?;
        texture.visibility = visibility;
        texture.order = order;
        Ok(())
    }

    pub fn set_coordinates(
        &mut self,
        handle: &TextureHandle,
        x: i32,
        y: i32,
    ) -> Result<(), RegistryError> {
        self.lookup_mut(handle)?.origin = Point { x, y };
        Ok(())
    }

    pub fn set_grid_indexes(
        &mut self,
        handle: &TextureHandle,
        grid_x: i32,
        grid_y: i32,
        scale: u32,
    ) -> Result<(), RegistryError> {
        let texture = self.lookup_mut(handle)?;
        texture.grid = GridIndexes { x: grid_x, y: grid_y };
        texture.grid_scale = scale;
        Ok(())
    }

    /// Textures in the order they were registered.
    pub fn iter_ordered(&self) -> Vec<(TextureHandle, &Texture)> {
        let mut textures: Vec<_> = self.textures.iter().map(|(h, t)| (*h, t)).collect();
        textures.sort_by_key(|(_, t)| t.serial);
        textures
    }

    fn lookup_mut(&mut self, handle: &TextureHandle) -> Result<&mut Texture, RegistryError> {
        check_not_null(handle)?;
        self.textures.get_mut(handle).ok_or_else(|| {
            warn!("update on unregistered texture {}", handle);
            RegistryError::Corrupted(*handle)
        })
    }
}

fn check_not_null(handle: &TextureHandle) -> Result<(), RegistryError> {
    if handle.is_null() {
        return Err(RegistryError::InvalidInput("null texture handle"));
    }
    Ok(())
}

impl Registry<TextureHandle, Texture> for TextureRegistry {
    fn contains(&self, key: &TextureHandle) -> bool {
        self.textures.contains_key(key)
    }

    fn get(&self, key: &TextureHandle) -> Option<&Texture> {
        self.textures.get(key)
    }

    fn len(&self) -> usize {
        self.textures.len()
    }

    /// Drop every texture. Outstanding handles become unknown.
    fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Shift;
    use image::RgbaImage;

    fn frame() -> Arc<Frame> {
        Arc::new(Frame { image: RgbaImage::new(2, 2), shift: Shift::default() })
    }

    #[test]
    fn test_initialize_defaults() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Item, Visibility::Off);

        let texture = registry.get(&handle).unwrap();
        assert_eq!(texture.origin, Point { x: 0, y: 0 });
        assert_eq!(texture.grid, GridIndexes { x: 0, y: 0 });
        assert_eq!(texture.order, Order::Item);
        assert_eq!(texture.visibility, Visibility::Off);
        assert!(!handle.is_null());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut registry = TextureRegistry::new();
        let a = registry.initialize(frame(), Order::Roof, Visibility::Off);
        let b = registry.initialize(frame(), Order::Roof, Visibility::Off);

        assert!(TextureHandle::is_equal(&a, &a));
        assert!(!TextureHandle::is_equal(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_is_equal_by_value() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Roof, Visibility::Off);
        let copy = TextureHandle::from_u128(handle.as_u128());

        assert!(TextureHandle::is_equal(&handle, &copy));
        registry.set_coordinates(&copy, 3, 4).unwrap();
        assert_eq!(registry.get(&handle).unwrap().origin, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_invalidate_twice_is_corrupted() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Roof, Visibility::Off);

        assert_eq!(registry.invalidate(&handle), Ok(()));
        assert_eq!(registry.invalidate(&handle), Err(RegistryError::Corrupted(handle)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_null_handle_is_invalid_input() {
        let mut registry = TextureRegistry::new();
        let null = TextureHandle::NULL;

        assert_eq!(registry.invalidate(&null).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(
            registry.set_coordinates(&null, 1, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            registry.set_grid_indexes(&null, 1, 1, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            registry
                .set_visibility_and_order(&null, Visibility::On, Order::Wall)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_updates_on_stale_handle_are_corrupted() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Roof, Visibility::Off);
        registry.invalidate(&handle).unwrap();

        assert_eq!(registry.set_coordinates(&handle, 1, 2), Err(RegistryError::Corrupted(handle)));
        assert_eq!(
            registry.set_grid_indexes(&handle, 1, 2, 3),
            Err(RegistryError::Corrupted(handle))
        );
        assert_eq!(
            registry.set_visibility_and_order(&handle, Visibility::On, Order::Floor),
            Err(RegistryError::Corrupted(handle))
        );
    }

    #[test]
    fn test_setters_mutate_fields() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Roof, Visibility::Off);

        registry.set_visibility_and_order(&handle, Visibility::On, Order::Critter).unwrap();
        registry.set_coordinates(&handle, -5, 12).unwrap();
        registry.set_grid_indexes(&handle, 7, 9, 32).unwrap();

        let texture = registry.get(&handle).unwrap();
        assert_eq!(texture.visibility, Visibility::On);
        assert_eq!(texture.order, Order::Critter);
        assert_eq!(texture.origin, Point { x: -5, y: 12 });
        assert_eq!(texture.grid, GridIndexes { x: 7, y: 9 });
        assert_eq!(texture.grid_scale, 32);
    }

    #[test]
    fn test_iter_ordered_follows_registration() {
        let mut registry = TextureRegistry::new();
        let handles: Vec<_> =
            (0..16).map(|_| registry.initialize(frame(), Order::Floor, Visibility::On)).collect();
        registry.invalidate(&handles[3]).unwrap();

        let ordered: Vec<_> = registry.iter_ordered().into_iter().map(|(h, _)| h).collect();
        let expected: Vec<_> =
            handles.iter().enumerate().filter(|(i, _)| *i != 3).map(|(_, h)| *h).collect();
        assert_eq!(ordered, expected);
    }

    fn drain<K, V, R: Registry<K, V>>(registry: &mut R) -> usize {
        let before = registry.len();
        registry.clear();
        before
    }

    #[test]
    fn test_registry_trait_surface() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Wall, Visibility::On);

        assert!(Registry::contains(&registry, &handle));
        assert_eq!(Registry::get(&registry, &handle).map(|t| t.order), Some(Order::Wall));
        assert_eq!(drain(&mut registry), 1);
        assert!(registry.is_empty());
        assert!(registry.get(&handle).is_none());
    }

    #[test]
    fn test_clear_invalidates_all_handles() {
        let mut registry = TextureRegistry::new();
        let handle = registry.initialize(frame(), Order::Roof, Visibility::Off);
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.invalidate(&handle), Err(RegistryError::Corrupted(handle)));
    }
}
