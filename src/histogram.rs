// Copyright 2016 rust-punkt developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::collections::hash_map::{self, Entry};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::item::Item;
use crate::key::{KeyFn, default_key};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Record<T> {
    item: T,
    frequency: usize,
}

/// A discrete histogram that keeps track of the number of times each item
/// is seen.
///
/// Items are identified by a derived string key rather than by equality:
/// two items with the same key are the same item, and the first one added
/// is kept as the representative. The key function is pluggable; see
/// [`default_key`] for the one a new histogram starts with.
///
/// Mutating methods return `&mut Self` so calls can be chained.
///
/// # Examples
///
/// ```
/// # use histogram::Histogram;
/// #
/// let mut hist: Histogram<i32> = Histogram::new();
/// hist.add([1, 2, 2, 3, 3, 3]).remove([3]);
///
/// assert_eq!(hist.size(), 3);
/// assert_eq!(hist.frequency(&2), 2);
/// assert_eq!(hist.frequency(&3), 2);
/// assert_eq!(hist.to_string(), "{(1:3):1,(2:3):2,(3:3):2}");
/// ```
#[derive(Clone)]
pub struct Histogram<T> {
    store: HashMap<String, Record<T>>,
    size: usize,
    key: KeyFn<T>,
}

impl<T> Histogram<T>
where
    T: Item + 'static,
{
    /// Creates a new empty histogram using the default key function.
    #[inline]
    pub fn new() -> Histogram<T> {
        Histogram::with_key(default_key())
    }
}

impl<T> Histogram<T> {
    /// Creates a new empty histogram using the given key function.
    pub fn with_key(key: KeyFn<T>) -> Histogram<T> {
        Histogram {
            store: HashMap::new(),
            size: 0,
            key,
        }
    }

    /// Returns the current key function.
    #[inline]
    pub fn key(&self) -> KeyFn<T> {
        Rc::clone(&self.key)
    }

    /// Installs a new key function. Existing entries keep the keys they were
    /// stored under; only later lookups and insertions use the new function.
    pub fn set_key(&mut self, key: KeyFn<T>) -> &mut Self {
        log::debug!("replacing key function, {} entries keep their keys", self.size);
        self.key = key;
        self
    }

    /// Derives the key of an item with the current key function.
    #[inline]
    pub fn derive_key(&self, item: &T) -> String {
        (self.key)(item)
    }

    /// Decrements the frequency of each item, removing items whose
    /// frequency reaches zero. Items that aren't present are ignored.
    pub fn remove<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            let key = self.derive_key(&item);

            if let Entry::Occupied(mut entry) = self.store.entry(key) {
                entry.get_mut().frequency -= 1;

                if entry.get().frequency == 0 {
                    log::trace!("removing {}", entry.key());
                    entry.remove();
                    self.size -= 1;
                }
            }
        }

        self
    }

    /// Removes every item from the histogram.
    pub fn clear(&mut self) -> &mut Self {
        log::debug!("clearing {} entries", self.size);
        self.store = HashMap::new();
        self.size = 0;
        self
    }

    /// Removes the given items outright, whatever their frequency.
    pub fn clear_items<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            let key = self.derive_key(&item);

            if self.store.remove(&key).is_some() {
                log::trace!("cleared {}", key);
                self.size -= 1;
            }
        }

        self
    }

    /// Sets the frequency of every item to 1.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        self.normalize_to(1)
    }

    /// Sets the frequency of every item to `frequency`. Stored frequencies
    /// are never zero, so normalizing to zero clears the histogram.
    pub fn normalize_to(&mut self, frequency: usize) -> &mut Self {
        if frequency == 0 {
            return self.clear();
        }

        log::debug!("normalizing {} entries to {}", self.size, frequency);

        for record in self.store.values_mut() {
            record.frequency = frequency;
        }

        self
    }

    /// Returns an iterator over `(item, frequency, key)` triples, in no
    /// particular order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.store.iter(),
        }
    }

    /// Calls `visit` with the item, frequency and key of every entry.
    pub fn each<F>(&self, mut visit: F) -> &Self
    where
        F: FnMut(&T, usize, &str),
    {
        for (item, frequency, key) in self.iter() {
            visit(item, frequency, key);
        }

        self
    }

    /// Returns the frequency of every item, in iteration order.
    pub fn frequencies(&self) -> Vec<usize> {
        self.iter().map(|(_, frequency, _)| frequency).collect()
    }

    /// Returns the keys of the histogram in ascending order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.store.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Checks if the histogram contains an item.
    #[inline]
    pub fn has(&self, item: &T) -> bool {
        self.store.contains_key(&self.derive_key(item))
    }

    /// Gets the frequency of an item, or 0 if it isn't present.
    #[inline]
    pub fn frequency(&self, item: &T) -> usize {
        self.store
            .get(&self.derive_key(item))
            .map(|record| record.frequency)
            .unwrap_or(0)
    }

    /// The number of distinct items.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The lowest frequency, or `None` if the histogram is empty.
    pub fn min(&self) -> Option<usize> {
        self.iter().map(|(_, frequency, _)| frequency).min()
    }

    /// The highest frequency, or `None` if the histogram is empty.
    pub fn max(&self) -> Option<usize> {
        self.iter().map(|(_, frequency, _)| frequency).max()
    }

    /// The sum of all frequencies.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, frequency, _)| frequency).sum()
    }

    /// The mean frequency. `NaN` if the histogram is empty.
    pub fn average(&self) -> f64 {
        self.total() as f64 / self.size as f64
    }

    /// The Shannon entropy of the distribution in bits per symbol.
    ///
    /// Terms are summed in key order, so the result doesn't depend on
    /// iteration order. An empty histogram has an entropy of 0.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        let sorted: BTreeMap<&str, usize> = self
            .iter()
            .map(|(_, frequency, key)| (key, frequency))
            .collect();

        sorted.values().fold(0f64, |sum, &frequency| {
            let ratio = frequency as f64 / total;
            sum - ratio * ratio.ln() / 2f64.ln()
        })
    }

    /// Compares two histograms.
    ///
    /// The histograms are equal if they are the same instance, or if they
    /// have the same size and every item of `self` has the same frequency in
    /// both. Each histogram looks items up with its own key function, so
    /// with differing key functions `a.equals(&b)` and `b.equals(&a)` may
    /// disagree.
    pub fn equals(&self, other: &Histogram<T>) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        self.size() == other.size()
            && self
                .iter()
                .all(|(item, _, _)| self.frequency(item) == other.frequency(item))
    }
}

impl<T> Histogram<T>
where
    T: Item,
{
    /// Adds an item, incrementing its frequency. Returns the new frequency
    /// of the item, or 0 if the item is absent and was ignored.
    #[inline]
    pub fn insert(&mut self, item: T) -> usize {
        self.insert_times(item, 1).unwrap_or_else(|saturated| saturated)
    }

    /// Adds each item in turn. Absent items are ignored.
    pub fn add<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.insert(item);
        }

        self
    }

    /// Adds every character of each text as its own item. Texts are split
    /// per `char`, not per UTF-16 code unit, so a character outside the
    /// basic multilingual plane is a single item.
    pub fn add_string_chars<I, S>(&mut self, texts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        T: From<char>,
    {
        for text in texts {
            self.add(text.as_ref().chars().map(T::from));
        }

        self
    }

    /// Replaces the contents of the histogram with the given items.
    pub fn set_items<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.clear().add(items)
    }

    /// Adds an item `times` times and returns its new frequency. A
    /// frequency that would overflow is held at `usize::MAX` and returned
    /// as the error.
    fn insert_times(&mut self, item: T, times: usize) -> Result<usize, usize> {
        if item.is_absent() || times == 0 {
            return Ok(0);
        }

        match self.store.entry((self.key)(&item)) {
            Entry::Occupied(mut entry) => {
                match entry.get().frequency.checked_add(times) {
                    Some(frequency) => {
                        entry.get_mut().frequency = frequency;
                        Ok(frequency)
                    }
                    None => {
                        log::debug!("frequency of {} saturated", entry.key());
                        entry.get_mut().frequency = usize::MAX;
                        Err(usize::MAX)
                    }
                }
            }
            Entry::Vacant(entry) => {
                log::trace!("new entry {}", entry.key());
                entry.insert(Record {
                    item,
                    frequency: times,
                });
                self.size += 1;
                Ok(times)
            }
        }
    }
}

impl<T> Histogram<T>
where
    T: Item + Clone,
{
    /// Adds every item of each histogram as many times as it was seen
    /// there. Items are keyed with this histogram's key function.
    /// Frequencies saturate at `usize::MAX`.
    pub fn merge<'a, I>(&mut self, histograms: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Histogram<T>>,
        T: 'a,
    {
        for other in histograms {
            log::debug!("merging {} entries into {}", other.size, self.size);

            for (item, frequency, _) in other.iter() {
                let _ = self.insert_times(item.clone(), frequency);
            }
        }

        self
    }

    /// Creates a histogram with the same key function, seeded once with
    /// each distinct item. Every frequency of the copy is 1; use
    /// [`Clone`] to duplicate the frequencies as well.
    pub fn copy(&self) -> Histogram<T> {
        let mut copy = Histogram::with_key(self.key());
        copy.set_items(self.items());
        copy
    }
}

impl<T> Histogram<T>
where
    T: Clone,
{
    /// Returns each distinct item, in iteration order.
    pub fn items(&self) -> Vec<T> {
        self.iter().map(|(item, _, _)| item.clone()).collect()
    }

    /// Returns `(item, frequency)` pairs, in iteration order.
    pub fn pairs(&self) -> Vec<(T, usize)> {
        self.iter()
            .map(|(item, frequency, _)| (item.clone(), frequency))
            .collect()
    }

    /// Returns the items that have exactly the given frequency.
    pub fn freq_to_items(&self, frequency: usize) -> Vec<T> {
        self.iter()
            .filter(|(_, f, _)| *f == frequency)
            .map(|(item, _, _)| item.clone())
            .collect()
    }

    /// Returns `(item, frequency)` pairs from lowest to highest frequency.
    pub fn sorted_pairs(&self) -> Vec<(T, usize)> {
        let mut pairs = self.pairs();
        pairs.sort_by_key(|(_, frequency)| *frequency);
        pairs
    }

    /// Returns `(item, frequency)` pairs sorted with a comparator.
    pub fn sorted_pairs_by<F>(&self, compare: F) -> Vec<(T, usize)>
    where
        F: FnMut(&(T, usize), &(T, usize)) -> Ordering,
    {
        let mut pairs = self.pairs();
        pairs.sort_by(compare);
        pairs
    }
}

impl<T> Default for Histogram<T>
where
    T: Item + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Histogram<T>
where
    T: Item + 'static,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut histogram: Histogram<T> = Histogram::new();
        histogram.add(iter);
        histogram
    }
}

impl<T> Extend<T> for Histogram<T>
where
    T: Item,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.add(iter);
    }
}

impl<'a, T> IntoIterator for &'a Histogram<T> {
    type Item = (&'a T, usize, &'a str);
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Formats the histogram as `{key:frequency,...}`, sorted by entry.
impl<T> fmt::Display for Histogram<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<String> = self
            .iter()
            .map(|(_, frequency, key)| format!("{}:{}", key, frequency))
            .collect();
        entries.sort();

        write!(f, "{{{}}}", entries.join(","))
    }
}

impl<T> fmt::Debug for Histogram<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted: BTreeMap<&String, &Record<T>> = self.store.iter().collect();

        f.debug_struct("Histogram")
            .field("size", &self.size)
            .field("store", &sorted)
            .finish()
    }
}

/// Serializes as a map from key, in ascending order, to the item and its
/// frequency.
impl<T> Serialize for Histogram<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sorted: BTreeMap<&String, &Record<T>> = self.store.iter().collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;

        for (key, record) in sorted {
            map.serialize_entry(key, record)?;
        }

        map.end()
    }
}

/// Rebuilds a histogram under the default key function. Stored keys are
/// not trusted; records whose items collide under the default key have
/// their frequencies added together; a sum that overflows is an error.
impl<'de, T> Deserialize<'de> for Histogram<T>
where
    T: Item + Deserialize<'de> + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records: BTreeMap<String, Record<T>> = BTreeMap::deserialize(deserializer)?;
        let mut histogram: Histogram<T> = Histogram::new();

        for record in records.into_values() {
            if histogram.insert_times(record.item, record.frequency).is_err() {
                return Err(de::Error::custom("frequency overflow"));
            }
        }

        Ok(histogram)
    }
}

impl FromStr for Histogram<Value> {
    type Err = &'static str;

    /// Parses a JSON array and counts its elements.
    fn from_str(s: &str) -> Result<Histogram<Value>, &'static str> {
        let json: Value = serde_json::from_str(s).map_err(|_| "failed to parse JSON")?;

        match json {
            Value::Array(items) => {
                let mut histogram: Histogram<Value> = Histogram::new();
                histogram.set_items(items);
                Ok(histogram)
            }
            _ => Err("expected a JSON array of items"),
        }
    }
}

/// Iterator over the `(item, frequency, key)` triples of a [`Histogram`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: hash_map::Iter<'a, String, Record<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, usize, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, record)| (&record.item, record.frequency, key.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
