use bytes::BytesMut;
use mqttsn_protocol::core::codec::PacketCodec;
use mqttsn_protocol::core::packet::Packet;
use mqttsn_protocol::core::topic::TopicId;
use mqttsn_protocol::protocol::packets::Publish;
use tokio_util::codec::{Decoder, Encoder};

#[test]
fn stress_packet_encode_decode_large_series() {
    // heavy burst across both header forms
    let mut codec = PacketCodec::datagram();
    let mut buf = BytesMut::new();

    for size in [0usize, 1, 64, 248, 249, 4096, 65_526] {
        for i in 0..2_000u16 {
            let packet: Packet = Publish {
                msg_id: i,
                ..Publish::new(TopicId::Predefined(i), vec![0u8; size])
            }
            .into();
            codec.encode(packet, &mut buf).unwrap();
            let decoded = codec.decode(&mut buf).unwrap();
            assert!(decoded.is_some());
            assert!(buf.is_empty());
        }
    }
}

#[test]
fn stress_stream_reassembly_in_chunks() {
    let mut encoder = PacketCodec::stream();
    let mut wire = BytesMut::new();
    let count = 5_000usize;
    for i in 0..count {
        let packet: Packet =
            Publish::new(TopicId::Normal(i as u16), vec![(i & 0xFF) as u8; i % 700]).into();
        encoder.encode(packet, &mut wire).unwrap();
    }

    let mut decoder = PacketCodec::stream();
    let mut buf = BytesMut::new();
    let mut decoded = 0usize;
    for chunk in wire.chunks(97) {
        buf.extend_from_slice(chunk);
        while let Some(packet) = decoder.decode(&mut buf).unwrap() {
            match packet {
                Packet::Publish(publish) => {
                    assert_eq!(publish.topic_id, TopicId::Normal(decoded as u16));
                    assert_eq!(publish.data.len(), decoded % 700);
                }
                other => panic!("unexpected packet: {other:?}"),
            }
            decoded += 1;
        }
    }

    assert_eq!(decoded, count);
    assert!(buf.is_empty());
}
