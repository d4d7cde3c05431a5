#![no_main]

use libfuzzer_sys::fuzz_target;
use protowire::{SizeMessage, WireMessage};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic; accepted input must re-encode to the same message
    if let Ok(msg) = SizeMessage::decode(data) {
        if let Ok(bytes) = msg.marshal() {
            assert_eq!(bytes.len(), msg.encoded_len());
            assert_eq!(SizeMessage::decode(&bytes).ok(), Some(msg));
        }
    }
});
