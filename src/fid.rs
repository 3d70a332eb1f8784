//! Sprite identifiers
//!
//! A fid packs an object-type tag and a within-type catalog index (plus
//! format-specific bits) into 32 bits. The bit layout is owned by the asset
//! format and reached through [`FidLayout`].

use std::fmt;

/// A 32-bit sprite file identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fid(pub u32);

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for Fid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Art catalog an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Item,
    Critter,
    Scenery,
    Wall,
    Tile,
    Misc,
    Interface,
    Inventory,
    Head,
    Background,
}

impl ObjectType {
    pub const ALL: [ObjectType; 10] = [
        ObjectType::Item,
        ObjectType::Critter,
        ObjectType::Scenery,
        ObjectType::Wall,
        ObjectType::Tile,
        ObjectType::Misc,
        ObjectType::Interface,
        ObjectType::Inventory,
        ObjectType::Head,
        ObjectType::Background,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObjectType::Item => "item",
            ObjectType::Critter => "critter",
            ObjectType::Scenery => "scenery",
            ObjectType::Wall => "wall",
            ObjectType::Tile => "tile",
            ObjectType::Misc => "misc",
            ObjectType::Interface => "interface",
            ObjectType::Inventory => "inventory",
            ObjectType::Head => "head",
            ObjectType::Background => "background",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six view directions of the isometric grid, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    NorthEast = 0,
    East = 1,
    SouthEast = 2,
    SouthWest = 3,
    West = 4,
    NorthWest = 5,
}

impl Orientation {
    pub const COUNT: usize = 6;

    pub const ALL: [Orientation; Orientation::COUNT] = [
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    /// Slot index of this orientation.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Helpers that decode a fid. Implemented by the asset-format layer.
pub trait FidLayout {
    /// Object type tag, or `None` if the tag names no known catalog.
    fn object_type(&self, fid: Fid) -> Option<ObjectType>;

    /// Index within the object type's catalog.
    fn index(&self, fid: Fid) -> u16;

    /// Whether a critter's art is stored as one file per orientation.
    fn is_split(&self, fid: Fid) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_slots_round_trip() {
        for (slot, orientation) in Orientation::ALL.iter().enumerate() {
            assert_eq!(orientation.index(), slot);
            assert_eq!(Orientation::from_index(slot), Some(*orientation));
        }
        assert_eq!(Orientation::from_index(6), None);
    }

    #[test]
    fn test_fid_display_is_hex() {
        assert_eq!(Fid(0x0100_002A).to_string(), "0x0100002a");
    }

    #[test]
    fn test_object_type_names_unique() {
        let mut names: Vec<_> = ObjectType::ALL.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ObjectType::ALL.len());
    }
}
