use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use super::parse::AttributeEntry;

/// The configured canonical attribute order.
///
/// Names not listed here are "unspecified": they sort after every listed name and keep their
/// source order among themselves. Built once per run and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec {
    names: Vec<String>,
    ranks: FxHashMap<String, usize>,
}

impl OrderSpec {
    /// Builds a spec from names in priority order. A repeated name keeps its first rank.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = OrderSpec::default();
        for name in names {
            let name = name.into();
            if spec.ranks.contains_key(&name) {
                continue;
            }
            spec.ranks.insert(name.clone(), spec.names.len());
            spec.names.push(name);
        }
        spec
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Listed names by rank, then unlisted names by original position.
    pub fn compare(&self, a: &AttributeEntry, b: &AttributeEntry) -> Ordering {
        match (self.rank(a.name()), self.rank(b.name())) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.original_index().cmp(&b.original_index()),
        }
    }

    /// Returns a new, stably sorted sequence; `entries` is left as parsed.
    pub fn sorted(&self, entries: &[AttributeEntry]) -> Vec<AttributeEntry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

impl<S: Into<String>> FromIterator<S> for OrderSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        OrderSpec::new(iter)
    }
}
