//! Layer filtering, depth ordering and painting.

use log::trace;
use std::cmp::Ordering;

use crate::registry::{Registry, Texture, TextureHandle, TextureRegistry};

use super::canvas::Canvas;
use super::layer::{LayerMask, Order};

/// Depth comparator for textures sharing the flat or middle band.
///
/// Same cell: lower category first. Same row: higher grid x first. Otherwise
/// lower grid y first.
pub fn compare_depth(lhs: &Texture, rhs: &Texture) -> Ordering {
    if lhs.grid == rhs.grid {
        lhs.order.cmp(&rhs.order)
    } else if lhs.grid.y == rhs.grid.y {
        rhs.grid.x.cmp(&lhs.grid.x)
    } else {
        lhs.grid.y.cmp(&rhs.grid.y)
    }
}

/// Handles of the textures to paint, in paint order.
///
/// Disabled categories and textures switched off are left out. Floor and
/// roof keep registration order; flat and middle are depth sorted, with
/// registration order breaking exact ties.
pub fn paint_order(registry: &TextureRegistry, mask: &LayerMask) -> Vec<TextureHandle> {
    let mut floor = Vec::new();
    let mut flat = Vec::new();
    let mut middle = Vec::new();
    let mut roof = Vec::new();

    for (handle, texture) in registry.iter_ordered() {
        if !mask.is_enabled(texture.order) || !texture.visibility.is_on() {
            continue;
        }

        match texture.order {
            Order::Floor => floor.push((handle, texture)),
            Order::Flat => flat.push((handle, texture)),
            Order::Roof => roof.push((handle, texture)),
            _ => middle.push((handle, texture)),
        }
    }

    flat.sort_by(|(_, a), (_, b)| compare_depth(a, b));
    middle.sort_by(|(_, a), (_, b)| compare_depth(a, b));

    floor
        .into_iter()
        .chain(flat)
        .chain(middle)
        .chain(roof)
        .map(|(handle, _)| handle)
        .collect()
}

/// Clear `canvas` and paint every drawable texture of `registry` onto it.
///
/// Returns the number of textures painted.
pub fn composite(canvas: &mut Canvas, registry: &TextureRegistry, mask: &LayerMask) -> usize {
    canvas.clear();

    let order = paint_order(registry, mask);
    for handle in &order {
        if let Some(texture) = registry.get(handle) {
            canvas.paint(&texture.frame, texture.origin);
        }
    }

    trace!("painted {} of {} textures", order.len(), registry.len());
    order.len()
}
