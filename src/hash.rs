// hash.rs - FNV-1a hashing and an open-addressing string table.
//
// Linear probing over a power-of-two slot array, doubling once the load
// factor would pass 3/4. Entries are never removed.

use std::collections::TryReserveError;
use std::hash::Hasher;

const FNV_OFFSET_64: u64 = 0xcbf29ce484222325;
const FNV_PRIME_64: u64 = 0x00000100000001B3;

const MIN_CAPACITY: usize = 16;

/// 64-bit Fowler-Noll-Vo 1a hash.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a(u64);

impl Fnv1a {
    pub const fn new() -> Self {
        Fnv1a(FNV_OFFSET_64)
    }

    pub const fn const_hash(bytes: &[u8]) -> u64 {
        let mut hash = FNV_OFFSET_64;
        let mut idx = 0;
        while idx < bytes.len() {
            hash ^= bytes[idx] as u64;
            hash = hash.wrapping_mul(FNV_PRIME_64);
            idx += 1;
        }
        hash
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Fnv1a::new()
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= *byte as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME_64);
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<V> {
    hash: u64,
    key: Box<[u8]>,
    value: V,
}

/// Byte-string keyed table with FNV-1a hashing and linear probing.
#[derive(Debug, Clone)]
pub struct FnvTable<V> {
    slots: Vec<Option<Slot<V>>>,
    len: usize,
}

impl<V> Default for FnvTable<V> {
    fn default() -> Self {
        FnvTable::new()
    }
}

fn alloc_slots<V>(capacity: usize) -> Result<Vec<Option<Slot<V>>>, TryReserveError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

impl<V> FnvTable<V> {
    /// Empty table; slots are allocated on first insert.
    pub fn new() -> Self {
        FnvTable {
            slots: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots (always zero or a power of two).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot holding `key`, or the empty slot where it would go.
    fn probe(&self, hash: u64, key: &[u8]) -> usize {
        let mask = self.slots.len() - 1;
        let mut i = (hash as usize) & mask;
        loop {
            match &self.slots[i] {
                Some(slot) if slot.hash == hash && &*slot.key == key => return i,
                Some(_) => i = (i + 1) & mask,
                None => return i,
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        if self.slots.is_empty() {
            return None;
        }
        let i = self.probe(Fnv1a::const_hash(key), key);
        self.slots[i].as_ref().map(|slot| &slot.value)
    }

    #[inline]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    fn grow(&mut self) -> Result<(), TryReserveError> {
        let capacity = (self.slots.len() * 2).max(MIN_CAPACITY);
        let old = std::mem::replace(&mut self.slots, alloc_slots(capacity)?);
        for slot in old.into_iter().flatten() {
            let i = self.probe(slot.hash, &slot.key);
            self.slots[i] = Some(slot);
        }
        Ok(())
    }

    /// Insert or replace; returns the previous value for `key`.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<Option<V>, TryReserveError> {
        if (self.len + 1) * 4 > self.slots.len() * 3 {
            self.grow()?;
        }
        let hash = Fnv1a::const_hash(key);
        let i = self.probe(hash, key);
        if let Some(slot) = &mut self.slots[i] {
            return Ok(Some(std::mem::replace(&mut slot.value, value)));
        }
        let mut owned = Vec::new();
        owned.try_reserve_exact(key.len())?;
        owned.extend_from_slice(key);
        self.slots[i] = Some(Slot {
            hash,
            key: owned.into_boxed_slice(),
            value,
        });
        self.len += 1;
        Ok(None)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| (&*slot.key, &slot.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(Fnv1a::const_hash(b""), 0xcbf29ce484222325);
        assert_eq!(Fnv1a::const_hash(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(Fnv1a::const_hash(b"foobar"), 0x85944171f73967e8);
        let mut h = Fnv1a::new();
        h.write(b"foo");
        h.write(b"bar");
        assert_eq!(h.finish(), Fnv1a::const_hash(b"foobar"));
    }

    #[test]
    fn insert_get_replace() {
        let mut t = FnvTable::new();
        assert_eq!(t.get(b"x"), None);
        assert_eq!(t.insert(b"x", 1).unwrap(), None);
        assert_eq!(t.insert(b"y", 2).unwrap(), None);
        assert_eq!(t.insert(b"x", 3).unwrap(), Some(1));
        assert_eq!(t.get(b"x"), Some(&3));
        assert_eq!(t.get(b"y"), Some(&2));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn grows_at_three_quarters() {
        let mut t = FnvTable::new();
        for i in 0..12u32 {
            t.insert(&i.to_le_bytes(), i).unwrap();
        }
        assert_eq!(t.capacity(), 16);
        t.insert(b"thirteen", 13).unwrap();
        assert_eq!(t.capacity(), 32);
        for i in 0..12u32 {
            assert_eq!(t.get(&i.to_le_bytes()), Some(&i));
        }
        assert_eq!(t.iter().count(), 13);
    }

    #[test]
    fn many_keys_survive_rehash() {
        let mut t = FnvTable::new();
        for i in 0..1000 {
            t.insert(format!("ident{}", i).as_bytes(), i).unwrap();
        }
        assert_eq!(t.len(), 1000);
        assert!(t.capacity().is_power_of_two());
        assert!(t.len() * 4 <= t.capacity() * 3);
        assert_eq!(t.get(b"ident777"), Some(&777));
        assert!(!t.contains_key(b"ident1000"));
    }
}
