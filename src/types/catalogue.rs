use std::collections::{BTreeMap, HashMap};

/// Item properties the decoder needs from the item catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    pub stackable: bool,
    pub splash: bool,
    pub fluid_container: bool,
}

impl ItemFlags {
    /// Whether version 0 maps store a count byte right after the item id
    pub fn has_legacy_count(&self) -> bool {
        self.stackable || self.splash || self.fluid_container
    }
}

/// Lookup from item id to catalogue properties
///
/// The decoder only consults it for version 0 maps, where the presence of a
/// count byte depends on the item type.
pub trait ItemCatalogue {
    fn item_flags(&self, id: u16) -> Option<ItemFlags>;
}

impl ItemCatalogue for HashMap<u16, ItemFlags> {
    fn item_flags(&self, id: u16) -> Option<ItemFlags> {
        self.get(&id).copied()
    }
}

impl ItemCatalogue for BTreeMap<u16, ItemFlags> {
    fn item_flags(&self, id: u16) -> Option<ItemFlags> {
        self.get(&id).copied()
    }
}

impl<C: ItemCatalogue + ?Sized> ItemCatalogue for &C {
    fn item_flags(&self, id: u16) -> Option<ItemFlags> {
        (**self).item_flags(id)
    }
}

/// Catalogue without entries, for maps that never need the legacy count rule
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalogue;

impl ItemCatalogue for EmptyCatalogue {
    fn item_flags(&self, _id: u16) -> Option<ItemFlags> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_count() {
        assert!(!ItemFlags::default().has_legacy_count());
        assert!(ItemFlags { splash: true, ..ItemFlags::default() }.has_legacy_count());
        assert!(ItemFlags { fluid_container: true, ..ItemFlags::default() }.has_legacy_count());
    }

    #[test]
    fn map_lookup() {
        let mut catalogue: HashMap<u16, ItemFlags> = HashMap::new();
        catalogue.insert(3031, ItemFlags { stackable: true, ..ItemFlags::default() });

        assert_eq!(catalogue.item_flags(3031).map(|f| f.stackable), Some(true));
        assert_eq!(catalogue.item_flags(1), None);
        assert_eq!(EmptyCatalogue.item_flags(3031), None);
    }
}
