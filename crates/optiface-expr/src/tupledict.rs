//! Insertion-ordered collections keyed by index tuples.
//!
//! A [`TupleDict`] maps fixed-arity tuples to values (usually variable
//! handles). Partial-key selection fixes some axes and wildcards the rest;
//! the pattern type is derived from the key so its arity always matches.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::expr::{ExprBuilder, Summand, quicksum};

/// A tuple usable as a [`TupleDict`] key.
pub trait TupleKey: Clone + Eq + Hash {
    /// One `Option` per axis: `Some(v)` fixes the axis, `None` matches any.
    type Pattern;

    fn matches(&self, pattern: &Self::Pattern) -> bool;
}

macro_rules! impl_tuple_key {
    ($(($($name:ident : $idx:tt),+))*) => {$(
        impl<$($name: Clone + Eq + Hash),+> TupleKey for ($($name,)+) {
            type Pattern = ($(Option<$name>,)+);

            fn matches(&self, pattern: &Self::Pattern) -> bool {
                true $(&& pattern.$idx.as_ref().is_none_or(|want| *want == self.$idx))+
            }
        }
    )*};
}

impl_tuple_key! {
    (A: 0)
    (A: 0, B: 1)
    (A: 0, B: 1, C: 2)
    (A: 0, B: 1, C: 2, D: 3)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleDict<K: TupleKey, V> {
    entries: IndexMap<K, V>,
}

impl<K: TupleKey, V> Default for TupleDict<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: TupleKey, V> TupleDict<K, V> {
    // ── Constructors ────────────────────────────────────────

    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per key, in iteration order, with the value from `factory`.
    pub fn from_keys(keys: impl IntoIterator<Item = K>, mut factory: impl FnMut(&K) -> V) -> Self {
        keys.into_iter()
            .map(|key| {
                let value = factory(&key);
                (key, value)
            })
            .collect()
    }

    /// Fallible [`TupleDict::from_keys`]; stops at the first error.
    pub fn try_from_keys<E>(
        keys: impl IntoIterator<Item = K>,
        mut factory: impl FnMut(&K) -> Result<V, E>,
    ) -> Result<Self, E> {
        let keys = keys.into_iter();
        let mut entries = IndexMap::with_capacity(keys.size_hint().0);
        for key in keys {
            let value = factory(&key)?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    // ── Access ──────────────────────────────────────────────

    /// Insert or replace; a replaced key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    // ── Selection ───────────────────────────────────────────

    /// Entries matching `pattern`, in insertion order.
    pub fn select<'a>(&'a self, pattern: &'a K::Pattern) -> impl Iterator<Item = (&'a K, &'a V)> {
        self.entries.iter().filter(move |(key, _)| key.matches(pattern))
    }

    pub fn select_values<'a>(&'a self, pattern: &'a K::Pattern) -> impl Iterator<Item = &'a V> {
        self.select(pattern).map(|(_, value)| value)
    }

    /// Sum of the selected values.
    pub fn sum(&self, pattern: &K::Pattern) -> ExprBuilder
    where
        for<'a> &'a V: Summand,
    {
        quicksum(self.select_values(pattern))
    }

    /// Sum of `f(key, value)` over the selection, e.g. coefficient-weighted
    /// handles.
    pub fn sum_by<S: Summand>(
        &self,
        pattern: &K::Pattern,
        mut f: impl FnMut(&K, &V) -> S,
    ) -> ExprBuilder {
        quicksum(self.select(pattern).map(|(key, value)| f(key, value)))
    }

    /// Transform every value, keeping keys and order.
    pub fn map<U>(&self, mut f: impl FnMut(&K, &V) -> U) -> TupleDict<K, U> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), f(key, value)))
            .collect()
    }
}

impl<A, B, V> TupleDict<(A, B), V>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
{
    /// Build over the Cartesian product `first × second`.
    pub fn make2(
        first: impl IntoIterator<Item = A>,
        second: impl IntoIterator<Item = B> + Clone,
        factory: impl FnMut(&(A, B)) -> V,
    ) -> Self {
        Self::from_keys(product2(first, second), factory)
    }
}

impl<A, B, C, V> TupleDict<(A, B, C), V>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
{
    /// Build over the Cartesian product `first × second × third`.
    pub fn make3(
        first: impl IntoIterator<Item = A>,
        second: impl IntoIterator<Item = B> + Clone,
        third: impl IntoIterator<Item = C> + Clone,
        factory: impl FnMut(&(A, B, C)) -> V,
    ) -> Self {
        Self::from_keys(product3(first, second, third), factory)
    }
}

impl<K: TupleKey, V> FromIterator<(K, V)> for TupleDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: TupleKey, V> IntoIterator for TupleDict<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K: TupleKey, V> IntoIterator for &'a TupleDict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Row-major Cartesian product of two index sets.
pub fn product2<A, B>(
    first: impl IntoIterator<Item = A>,
    second: impl IntoIterator<Item = B> + Clone,
) -> impl Iterator<Item = (A, B)>
where
    A: Clone,
{
    first.into_iter().flat_map(move |a| {
        second
            .clone()
            .into_iter()
            .map(move |b| (a.clone(), b))
    })
}

/// Row-major Cartesian product of three index sets.
pub fn product3<A, B, C>(
    first: impl IntoIterator<Item = A>,
    second: impl IntoIterator<Item = B> + Clone,
    third: impl IntoIterator<Item = C> + Clone,
) -> impl Iterator<Item = (A, B, C)>
where
    A: Clone,
    B: Clone,
{
    product2(first, second).flat_map(move |(a, b)| {
        third
            .clone()
            .into_iter()
            .map(move |c| (a.clone(), b.clone(), c))
    })
}
