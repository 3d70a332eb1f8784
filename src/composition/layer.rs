//! Layer categories and the per-category visibility mask.

use serde::{Deserialize, Serialize};

/// Z-order bucket a texture is drawn in, lowest first.
///
/// Everything strictly between [`Order::Flat`] and [`Order::Roof`] is the
/// "middle" band, which is depth-sorted as one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Floor,
    Flat,
    Scenery,
    Wall,
    Item,
    Critter,
    Misc,
    Roof,
}

impl Order {
    pub const COUNT: usize = 8;

    pub const ALL: [Order; Order::COUNT] = [
        Order::Floor,
        Order::Flat,
        Order::Scenery,
        Order::Wall,
        Order::Item,
        Order::Critter,
        Order::Misc,
        Order::Roof,
    ];

    /// Whether this category lies strictly between flat and roof.
    pub fn is_middle(self) -> bool {
        self > Order::Flat && self < Order::Roof
    }
}

/// Which layer categories are drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerMask {
    pub floor: bool,
    pub flat: bool,
    pub scenery: bool,
    pub wall: bool,
    pub item: bool,
    pub critter: bool,
    pub misc: bool,
    pub roof: bool,
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::all()
    }
}

impl LayerMask {
    /// Every category enabled.
    pub fn all() -> Self {
        Self {
            floor: true,
            flat: true,
            scenery: true,
            wall: true,
            item: true,
            critter: true,
            misc: true,
            roof: true,
        }
    }

    /// Every category disabled.
    pub fn none() -> Self {
        Self {
            floor: false,
            flat: false,
            scenery: false,
            wall: false,
            item: false,
            critter: false,
            misc: false,
            roof: false,
        }
    }

    pub fn is_enabled(&self, order: Order) -> bool {
        *self.slot(order)
    }

    pub fn set(&mut self, order: Order, enabled: bool) {
        *self.slot_mut(order) = enabled;
    }

    /// Builder-style [`set`](LayerMask::set).
    pub fn with(mut self, order: Order, enabled: bool) -> Self {
        self.set(order, enabled);
        self
    }

    fn slot(&self, order: Order) -> &bool {
        match order {
            Order::Floor => &self.floor,
            Order::Flat => &self.flat,
            Order::Scenery => &self.scenery,
            Order::Wall => &self.wall,
            Order::Item => &self.item,
            Order::Critter => &self.critter,
            Order::Misc => &self.misc,
            Order::Roof => &self.roof,
        }
    }

    fn slot_mut(&mut self, order: Order) -> &mut bool {
        match order {
            Order::Floor => &mut self.floor,
            Order::Flat => &mut self.flat,
            Order::Scenery => &mut self.scenery,
            Order::Wall => &mut self.wall,
            Order::Item => &mut self.item,
            Order::Critter => &mut self.critter,
            Order::Misc => &mut self.misc,
            Order::Roof => &mut self.roof,
        }
    }
}
