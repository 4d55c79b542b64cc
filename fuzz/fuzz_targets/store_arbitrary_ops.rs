#![no_main]

use std::collections::HashMap;

use cachefront::store::{BackingStore, CacheAddressedStore, MemoryStore};
use libfuzzer_sys::fuzz_target;

// Drives the store against a plain map and checks that a read never returns
// anything but the last written content.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let mut store = CacheAddressedStore::new(MemoryStore::new("root"), usize::from(cap % 8));
    let mut model: HashMap<u8, u8> = HashMap::new();

    for chunk in ops.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 4, chunk[1] % 32, chunk[2]);
        match op {
            0 => {
                let created = store.create(key, value).is_ok();
                assert_eq!(created, !model.contains_key(&key));
                model.entry(key).or_insert(value);
            },
            1 => {
                if store.write(&key, value).is_ok() {
                    model.insert(key, value);
                } else {
                    assert!(!model.contains_key(&key));
                }
            },
            2 => {
                let deleted = store.delete(&key).is_ok();
                assert_eq!(deleted, model.remove(&key).is_some());
            },
            _ => {
                assert_eq!(store.read(&key).ok(), model.get(&key).copied());
            },
        }
    }
    assert_eq!(store.backing().list().len(), model.len());
});
