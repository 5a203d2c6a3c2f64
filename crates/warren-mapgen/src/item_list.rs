//! Provenance records produced by generation steps.

/// One recorded item and the tag of the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry<T> {
    /// The recorded item
    pub item: T,
    /// Producer tag, e.g. `"backroom"`
    pub tag: String,
}

/// Append-only ordered list of `(item, tag)` pairs.
///
/// Steps record what they built (rooms, corridors) so later consumers can
/// annotate the finished map. Nothing inside the pipeline reads it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList<T> {
    entries: Vec<ItemEntry<T>>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ItemList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one item.
    pub fn add(&mut self, item: T, tag: &str) {
        self.entries.push(ItemEntry {
            item,
            tag: tag.to_owned(),
        });
    }

    /// Appends every item of `items` under the same tag, in order.
    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>, tag: &str) {
        self.entries.extend(items.into_iter().map(|item| ItemEntry {
            item,
            tag: tag.to_owned(),
        }));
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ItemEntry<T>> {
        self.entries.iter()
    }

    /// Items without their tags, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Items recorded under `tag`.
    pub fn items_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a T> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.tag == tag)
            .map(|e| &e.item)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a ItemList<T> {
    type Item = &'a ItemEntry<T>;
    type IntoIter = std::slice::Iter<'a, ItemEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order_and_tags() {
        let mut list = ItemList::new();
        list.add(1, "room");
        list.add_range([2, 3], "hall");
        list.add(4, "room");

        assert_eq!(list.len(), 4);
        assert_eq!(list.items().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(
            list.items_tagged("room").copied().collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert_eq!(list.iter().nth(1).map(|e| e.tag.as_str()), Some("hall"));
    }

    #[test]
    fn test_empty() {
        let list: ItemList<u8> = ItemList::default();
        assert!(list.is_empty());
        assert_eq!(list.items_tagged("room").count(), 0);
    }
}
