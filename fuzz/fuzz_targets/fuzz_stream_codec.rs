#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use mqttsn_protocol::PacketCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the stream decoder until it stalls or errors
    let mut codec = PacketCodec::stream();
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
