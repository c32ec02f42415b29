//! Fuzz target: single-frame decoder.
//!
//! Arbitrary bytes must never panic the decoder. When the length prefix is
//! written canonically (no leading zeros), re-encoding the payload must
//! reproduce exactly the bytes the decoder consumed.
#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    let mut payload = Vec::new();
    let Ok(len) = garlic_netstring::decode(&mut cursor, |len| len <= 1 << 20, &mut payload) else {
        return;
    };
    assert_eq!(payload.len() as u64, len);

    let consumed = &data[..cursor.position() as usize];
    let Some(colon) = consumed.iter().position(|&b| b == b':') else {
        panic!("decoded frame without a ':'");
    };
    if consumed[..colon] == *len.to_string().as_bytes() {
        assert_eq!(consumed, garlic_netstring::to_vec(&payload).as_slice());
    }
});
