//! Pairing of entities across two snapshots by exact name

use std::collections::{HashMap, HashSet};

/// An entity identified by its name within its collection
pub trait Named {
    /// Name used to pair the entity across snapshots
    fn name(&self) -> &str;
}

/// Names present in both collections, in the order of `compare`
///
/// Names repeated in `compare` are repeated in the output; entities present
/// on one side only are dropped.
///
/// # Examples
///
/// ```
/// use gates_diff::diff::{match_names, Named};
///
/// struct Item(&'static str);
/// impl Named for Item {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let source = [Item("a"), Item("b"), Item("c")];
/// let compare = [Item("c"), Item("d"), Item("a")];
/// assert_eq!(match_names(&source, &compare), vec!["c", "a"]);
/// ```
pub fn match_names<'a, T: Named>(source: &[T], compare: &'a [T]) -> Vec<&'a str> {
    let source_names: HashSet<&str> = source.iter().map(Named::name).collect();

    compare
        .iter()
        .map(Named::name)
        .filter(|name| source_names.contains(name))
        .collect()
}

/// Lookup from name to the first entity carrying it
pub struct NameIndex<'a, T> {
    entries: HashMap<&'a str, &'a T>,
}

impl<'a, T: Named> NameIndex<'a, T> {
    /// Index a collection; with duplicate names the first occurrence wins
    pub fn new(items: &'a [T]) -> Self {
        let mut entries = HashMap::with_capacity(items.len());
        for item in items {
            entries.entry(item.name()).or_insert(item);
        }
        Self { entries }
    }

    /// Entity registered under `name`
    pub fn get(&self, name: &str) -> Option<&'a T> {
        self.entries.get(name).copied()
    }
}

/// An entity found on both sides of a comparison
#[derive(Debug)]
pub struct MatchedPair<'a, T> {
    /// Shared name
    pub name: &'a str,
    /// Entity in the reference snapshot
    pub source: &'a T,
    /// Entity in the current snapshot
    pub compare: &'a T,
}

// Manual impls: a derive would require `T: Clone`/`T: Copy`.
impl<T> Clone for MatchedPair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchedPair<'_, T> {}

/// Pair entities of both collections sharing a name, in `compare` order
///
/// Each matched name resolves to the first entity with that name on each
/// side, so the pairing is established in a single pass and every pair is
/// complete by construction.
pub fn match_entities<'a, T: Named>(source: &'a [T], compare: &'a [T]) -> Vec<MatchedPair<'a, T>> {
    let source_index = NameIndex::new(source);
    let compare_index = NameIndex::new(compare);

    compare
        .iter()
        .filter_map(|item| {
            let name = item.name();
            Some(MatchedPair {
                name,
                source: source_index.get(name)?,
                compare: compare_index.get(name)?,
            })
        })
        .collect()
}
