//! Common trait for keyed stores.

/// Common trait for registries that map keys to stored items.
///
/// # Type Parameters
///
/// * `K` - The key identifying an item
/// * `V` - The type of value stored in the registry
///
/// # Example
///
/// ```
/// use isorender::registry::{Registry, TextureRegistry};
/// use isorender::composition::Order;
/// use isorender::registry::Visibility;
/// use isorender::sprite::{Frame, Shift};
/// use image::RgbaImage;
/// use std::sync::Arc;
///
/// let mut registry = TextureRegistry::new();
/// let frame = Arc::new(Frame { image: RgbaImage::new(1, 1), shift: Shift::default() });
/// let handle = registry.initialize(frame, Order::Roof, Visibility::Off);
///
/// assert!(registry.contains(&handle));
/// assert_eq!(registry.len(), 1);
/// ```
pub trait Registry<K, V> {
    /// Check if an item with the given key exists in the registry.
    fn contains(&self, key: &K) -> bool;

    /// Get an item by key.
    ///
    /// Returns `None` if no item with the given key exists.
    fn get(&self, key: &K) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);
}
