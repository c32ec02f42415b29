//! Fuzz target: streaming reader.
//!
//! The reader must terminate on any input and never report more frames
//! than it yielded.
#![no_main]

use std::io::Cursor;

use garlic_netstring::{DecoderConfig, NetstringReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = NetstringReader::with_config(Cursor::new(data), DecoderConfig::with_max_len(4096));
    let mut yielded = 0u64;
    while let Ok(Some(_)) = reader.next_frame() {
        yielded += 1;
    }
    assert_eq!(reader.frames_read(), yielded);
    assert!(matches!(reader.next_frame(), Ok(None)), "reader must stay finished");
});
