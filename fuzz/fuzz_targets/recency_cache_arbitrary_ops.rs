#![no_main]

use cachefront::policy::RecencyCache;
use cachefront::traits::{CachePolicy, RecencyPolicy};
use libfuzzer_sys::fuzz_target;

// Random get/put/remove/touch/pop sequences; the capacity comes from the
// first byte so capacity 0 and 1 are covered too.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: RecencyCache<u8, u8> = RecencyCache::new(capacity);

    for chunk in ops.chunks_exact(2) {
        let (op, key) = (chunk[0] % 6, chunk[1]);
        match op {
            0 => {
                let _ = cache.get(&key);
            },
            1 => {
                let was_present = cache.contains(&key);
                let evicted = cache.put(key, op);
                if was_present {
                    assert!(evicted.is_none());
                }
                if capacity > 0 {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            2 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            },
            3 => {
                let _ = cache.touch(&key);
            },
            4 => {
                let before = cache.len();
                if cache.pop_lru().is_some() {
                    assert_eq!(cache.len(), before - 1);
                }
            },
            _ => {
                let _ = cache.peek_lru();
            },
        }
        assert!(cache.len() <= capacity);
    }
    cache.check_invariants().unwrap();
});
