//! Fuzz target: `record::decode`
//!
//! Feeds arbitrary bytes to the wire record decoder and asserts that it
//! never panics, only accepts exact-length input, and that anything it
//! accepts re-encodes to the same bytes.
//!
//! cargo fuzz run fuzz_record_decoder

#![no_main]

use ecs_node::link::record::{self, RECORD_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(reading) = record::decode(data) else {
        return;
    };
    assert_eq!(data.len(), RECORD_LEN, "decoder accepted a wrong-length record");

    // NaN payloads don't compare equal, so compare bytes instead.
    let bytes = record::encode(&reading).expect("decoded record must re-encode");
    assert_eq!(&bytes[..], data);
});
