// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Bounded least-recently-used cache with O(1) lookups, promotion and eviction.

use std::{fmt::Debug, hash::Hash};

use ahash::AHashMap;

/// Upper bound on the number of slots reserved up front by [`LruCache::new`].
const PREALLOCATE_LIMIT: usize = 1024;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A bounded cache that maintains key-value pairs in least-recently-used order.
///
/// Entries live in a dense `Vec` of nodes linked into a doubly-linked recency list, with an
/// `AHashMap` from key to node slot for O(1) access. The head of the list is the least recently
/// used entry (next eviction candidate), the tail is the most recently used.
///
/// Every touch through [`LruCache::get`], [`LruCache::set`] or [`LruCache::put`] moves the key
/// to the tail. Inserting a new key beyond capacity evicts the head exactly once.
///
/// A capacity of zero is valid: new entries are evicted as soon as they are inserted, so the
/// cache always stays empty while writes still succeed.
///
/// # Thread Safety
///
/// This cache is not thread-safe. If shared across threads, wrap it in an appropriate
/// synchronization primitive such as `Arc<Mutex<LruCache<K, V>>>`.
///
/// # Examples
///
/// ```
/// use flagcache_core::lru::LruCache;
///
/// let mut cache: LruCache<&str, u32> = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1)); // promotes "a"
///
/// // Inserting beyond capacity evicts the least recently used ("b")
/// cache.put("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"c"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    capacity: usize,
    index: AHashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    /// Creates a new empty [`LruCache`] holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOCATE_LIMIT);

        Self {
            capacity,
            index: AHashMap::with_capacity(reserve),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
        }
    }

    /// Returns the capacity of the cache.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries in the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns whether the cache contains the given key, without promoting it.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns a reference to the value for the given key and promotes it to most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        Some(&self.nodes[idx].value)
    }

    /// Returns a reference to the value for the given key without changing its recency.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.nodes[idx].value)
    }

    /// Inserts or updates a key-value pair, discarding any previous value.
    pub fn set(&mut self, key: K, value: V) {
        self.put(key, value);
    }

    /// Inserts or updates a key-value pair.
    ///
    /// If the key already exists its value is replaced and the key is promoted to most recently
    /// used; the previous value is returned. If the key is new it is inserted as most recently
    /// used and `None` is returned, evicting the least recently used entry when the insert
    /// exceeds capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            let previous = std::mem::replace(&mut self.nodes[idx].value, value);
            self.promote(idx);
            return Some(previous);
        }

        self.insert_new(key, value);
        None
    }

    /// Inserts or updates a key-value pair, returning the displaced entry.
    ///
    /// For an existing key this is the key with its previous value. For a new key this is the
    /// entry evicted to make room, if any (with zero capacity, the new entry itself).
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            let previous = std::mem::replace(&mut self.nodes[idx].value, value);
            self.promote(idx);
            return Some((key, previous));
        }

        self.insert_new(key, value)
    }

    /// Removes a key from the cache, returning the value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        Some(self.release(idx).1)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        self.index.remove(&self.nodes[idx].key);
        Some(self.release(idx))
    }

    /// Clears all entries from the cache.
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator over the entries from least to most recently used.
    ///
    /// Iterating does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    fn insert_new(&mut self, key: K, value: V) -> Option<(K, V)> {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.attach_tail(idx);

        if self.len() > self.capacity {
            let evicted = self.pop_lru();
            if let Some((key, _)) = &evicted {
                log::trace!("Evicted least recently used key {key:?}");
            }
            return evicted;
        }

        None
    }

    fn promote(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_tail(idx);
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[idx];
        node.prev = None;
        node.next = None;
    }

    fn attach_tail(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = None;

        match self.tail {
            Some(t) => self.nodes[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Unlinks the node at `idx` and removes it from storage. The caller must already have
    /// removed its key from the index.
    fn release(&mut self, idx: usize) -> (K, V) {
        self.detach(idx);
        let node = self.nodes.swap_remove(idx);

        // The last node (if any) now occupies `idx`, so repoint everything that referenced it
        if idx < self.nodes.len() {
            let (prev, next) = {
                let moved = &self.nodes[idx];
                (moved.prev, moved.next)
            };

            match prev {
                Some(p) => self.nodes[p].next = Some(idx),
                None => self.head = Some(idx),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(idx),
                None => self.tail = Some(idx),
            }

            if let Some(slot) = self.index.get_mut(&self.nodes[idx].key) {
                *slot = idx;
            }
        }

        (node.key, node.value)
    }
}

/// Iterator over [`LruCache`] entries from least to most recently used.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.nodes[idx];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Clone + Debug + Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn keys<V>(cache: &LruCache<u32, V>) -> Vec<u32> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[rstest]
    fn test_put_and_get() {
        let mut cache: LruCache<u32, String> = LruCache::new(4);
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string());

        assert_eq!(cache.get(&1), Some(&"one".to_string()));
        assert_eq!(cache.get(&2), Some(&"two".to_string()));
        assert_eq!(cache.get(&3), Some(&"three".to_string()));
        assert_eq!(cache.get(&4), None);
        assert_eq!(cache.len(), 3);
    }

    #[rstest]
    fn test_end_to_end_read_promotion() {
        let mut cache: LruCache<&str, u32> = LruCache::new(2);
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.put("c", 3), None);

        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[rstest]
    fn test_eviction_at_capacity() {
        let mut cache: LruCache<u32, &str> = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        assert_eq!(cache.len(), 3);

        // Adding a 4th should evict the least recently used (1)
        cache.put(4, "four");
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek(&1), None);
        assert_eq!(cache.peek(&2), Some(&"two"));
        assert_eq!(cache.peek(&3), Some(&"three"));
        assert_eq!(cache.peek(&4), Some(&"four"));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(16)]
    fn test_overflow_by_one_evicts_first_key(#[case] capacity: u32) {
        let mut cache: LruCache<u32, u32> = LruCache::new(capacity as usize);
        for k in 1..=capacity + 1 {
            cache.put(k, k * 10);
        }

        assert!(!cache.contains(&1));
        assert_eq!(keys(&cache), (2..=capacity + 1).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_get_promotes_lru_key() {
        let mut cache: LruCache<u32, u32> = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        // 1 is the eviction candidate until read
        assert_eq!(cache.get(&1), Some(&10));
        cache.put(4, 40);

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert_eq!(keys(&cache), vec![3, 1, 4]);
    }

    #[rstest]
    fn test_update_promotes_key() {
        let mut cache: LruCache<u32, &str> = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        cache.set(1, "ONE");
        cache.put(4, "four");
        cache.put(5, "five");

        // Only the re-set key survives alongside the newest inserts
        assert_eq!(keys(&cache), vec![1, 4, 5]);
        assert_eq!(cache.peek(&1), Some(&"ONE"));
    }

    #[rstest]
    fn test_put_returns_previous_value() {
        let mut cache: LruCache<&str, u32> = LruCache::new(2);
        assert_eq!(cache.put("k", 1), None);
        assert_eq!(cache.put("k", 2), Some(1));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&"k"), Some(&2));
    }

    #[rstest]
    fn test_peek_does_not_promote() {
        let mut cache: LruCache<u32, u32> = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.peek(&1), Some(&10));
        assert!(cache.contains(&1));
        cache.put(3, 30);

        assert!(!cache.contains(&1));
        assert_eq!(keys(&cache), vec![2, 3]);
    }

    #[rstest]
    fn test_miss_has_no_side_effects() {
        let mut cache: LruCache<u32, u32> = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);

        assert_eq!(cache.get(&99), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec![1, 2]);
    }

    #[rstest]
    fn test_zero_capacity_accepts_and_discards() {
        let mut cache: LruCache<u32, u32> = LruCache::new(0);

        assert_eq!(cache.put(1, 10), None);
        cache.set(2, 20);
        assert_eq!(cache.push(3, 30), Some((3, 30)));

        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
        assert_eq!(keys(&cache), Vec::<u32>::new());
    }

    #[rstest]
    fn test_push_returns_evicted_entry() {
        let mut cache: LruCache<u32, &str> = LruCache::new(2);
        assert_eq!(cache.push(1, "one"), None);
        assert_eq!(cache.push(2, "two"), None);
        assert_eq!(cache.push(1, "ONE"), Some((1, "one")));
        assert_eq!(cache.push(3, "three"), Some((2, "two")));
        assert_eq!(keys(&cache), vec![1, 3]);
    }

    #[rstest]
    fn test_remove() {
        let mut cache: LruCache<u32, &str> = LruCache::new(4);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert_eq!(cache.remove(&2), Some("two"));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec![1, 3]);
    }

    #[rstest]
    fn test_remove_frees_slot_for_new_element() {
        let mut cache: LruCache<u32, u32> = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);
        cache.remove(&1);

        // New element should not evict anyone
        cache.put(4, 40);
        assert_eq!(cache.len(), 3);
        assert_eq!(keys(&cache), vec![2, 3, 4]);
        assert_eq!(cache.get(&2), Some(&20));
        assert_eq!(cache.get(&4), Some(&40));
    }

    #[rstest]
    fn test_pop_lru() {
        let mut cache: LruCache<u32, u32> = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.get(&1);

        assert_eq!(cache.pop_lru(), Some((2, 20)));
        assert_eq!(cache.pop_lru(), Some((1, 10)));
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.is_empty());
    }

    #[rstest]
    fn test_clear() {
        let mut cache: LruCache<u32, u32> = LruCache::new(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);

        cache.put(3, 30);
        assert_eq!(keys(&cache), vec![3]);
    }

    #[rstest]
    fn test_capacity_one() {
        let mut cache: LruCache<u32, &str> = LruCache::new(1);
        cache.put(1, "one");
        assert_eq!(cache.get(&1), Some(&"one"));

        cache.put(2, "two");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"two"));
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    fn test_string_keys() {
        let mut cache: LruCache<String, u32> = LruCache::new(2);
        cache.put(String::new(), 0);
        cache.put("hello".to_string(), 1);

        assert_eq!(cache.get(&String::new()), Some(&0));
        cache.put("world".to_string(), 2);
        assert!(!cache.contains(&"hello".to_string()));
        assert!(cache.contains(&String::new()));
    }

    #[rstest]
    fn test_iter_exact_size() {
        let mut cache: LruCache<u32, u32> = LruCache::new(4);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        let iter = cache.iter();
        assert_eq!(iter.len(), 3);
        let pairs: Vec<_> = (&cache).into_iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(1, 10), (2, 20), (3, 30)]);
    }

    use proptest::prelude::*;

    /// Operations that can be performed on an LruCache
    #[derive(Clone, Debug)]
    enum Op {
        Put(u8, u16),
        Get(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..24u8, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            2 => (0..24u8).prop_map(Op::Get),
            1 => (0..24u8).prop_map(Op::Remove),
        ]
    }

    fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
        proptest::collection::vec(op_strategy(), 0..200)
    }

    /// Reference model: a vector ordered from least to most recently used
    fn model_apply(model: &mut Vec<(u8, u16)>, capacity: usize, op: &Op) -> Option<u16> {
        match *op {
            Op::Put(k, v) => {
                let previous = model
                    .iter()
                    .position(|(mk, _)| *mk == k)
                    .map(|pos| model.remove(pos).1);
                model.push((k, v));
                if model.len() > capacity {
                    model.remove(0);
                }
                previous
            }
            Op::Get(k) => {
                let pos = model.iter().position(|(mk, _)| *mk == k)?;
                let entry = model.remove(pos);
                model.push(entry);
                Some(entry.1)
            }
            Op::Remove(k) => {
                let pos = model.iter().position(|(mk, _)| *mk == k)?;
                Some(model.remove(pos).1)
            }
        }
    }

    fn cache_apply(cache: &mut LruCache<u8, u16>, op: &Op) -> Option<u16> {
        match *op {
            Op::Put(k, v) => cache.put(k, v),
            Op::Get(k) => cache.get(&k).copied(),
            Op::Remove(k) => cache.remove(&k),
        }
    }

    proptest! {
        /// Invariant: len() never exceeds capacity after any operation
        #[rstest]
        fn prop_len_never_exceeds_capacity(capacity in 0..10usize, ops in ops_strategy()) {
            let mut cache: LruCache<u8, u16> = LruCache::new(capacity);
            for op in &ops {
                cache_apply(&mut cache, op);
                prop_assert!(cache.len() <= cache.capacity());
                prop_assert_eq!(cache.iter().count(), cache.len());
            }
        }

        /// Invariant: results and recency order agree with the reference model
        #[rstest]
        fn prop_matches_reference_model(capacity in 0..10usize, ops in ops_strategy()) {
            let mut cache: LruCache<u8, u16> = LruCache::new(capacity);
            let mut model: Vec<(u8, u16)> = Vec::new();

            for op in &ops {
                let expected = model_apply(&mut model, capacity, op);
                let actual = cache_apply(&mut cache, op);
                prop_assert_eq!(actual, expected, "diverged on {:?}", op);
            }

            let entries: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(entries, model);
        }

        /// Invariant: After put(k, v) with non-zero capacity, get(k) returns Some(&v)
        #[rstest]
        fn prop_put_ensures_get(ops in ops_strategy(), key in 0..24u8, value in any::<u16>()) {
            let mut cache: LruCache<u8, u16> = LruCache::new(4);
            for op in &ops {
                cache_apply(&mut cache, op);
            }
            cache.put(key, value);
            prop_assert_eq!(cache.get(&key), Some(&value));
        }
    }
}
