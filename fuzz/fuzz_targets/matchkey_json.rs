#![no_main]

use libfuzzer_sys::fuzz_target;
use marc_matchkey::{GoldRushKey, MatchKeyStrategy};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(key) = GoldRushKey::new().matchkey_json(input) {
        assert_eq!(key, key.to_lowercase());
    }
});
