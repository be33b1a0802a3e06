#![no_main]

use libfuzzer_sys::fuzz_target;
use mqttsn_protocol::Packet;

fuzz_target!(|data: &[u8]| {
    // Fuzz frame parsing - test for panics, then re-encode whatever parses
    if let Ok(packet) = Packet::from_bytes(data) {
        let _ = packet.to_bytes();
    }
});
