use cachefront::policy::FrequencyCache;
use cachefront::traits::{CachePolicy, FrequencyPolicy};

fn main() {
    let mut cache: FrequencyCache<&str, String> = FrequencyCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    cache.get(&"a");
    let evicted = cache.put("c", "gamma".to_string());

    println!("evicted: {:?}", evicted.map(|(key, _)| key));
    println!("frequency of a: {:?}", cache.frequency(&"a"));
    println!("frequency of c: {:?}", cache.frequency(&"c"));
}

// Expected output:
// evicted: Some("b")
// frequency of a: Some(3)
// frequency of c: Some(1)
//
// Explanation: capacity=2; "a" was inserted then read twice, "b" only inserted,
// so "b" holds the lowest frequency when "c" arrives.
