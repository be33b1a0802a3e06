use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use mqttsn_protocol::{
    core::codec::PacketCodec, core::packet::Packet, core::topic::TopicId,
    protocol::packets::Connect, protocol::packets::Publish,
};
use tokio_util::codec::{Decoder, Encoder};

fn publish(size: usize) -> Packet {
    Publish::new(TopicId::Normal(1), vec![0u8; size]).into()
}

#[allow(clippy::unwrap_used)]
fn bench_publish_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_encode_decode");
    let payload_sizes = [0usize, 64, 248, 1024, 16 * 1024, 65_000];

    for &size in &payload_sizes {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("encode_{size}b"), |b| {
            let mut codec = PacketCodec::datagram();
            b.iter_batched(
                || publish(size),
                |packet| {
                    let mut buf = BytesMut::with_capacity(size + 16);
                    codec.encode(packet, &mut buf).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("decode_{size}b"), |b| {
            let bytes = publish(size).to_bytes().unwrap();
            b.iter(|| {
                let decoded = Packet::from_bytes(&bytes);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_stream_decode(c: &mut Criterion) {
    let mut wire = BytesMut::new();
    let mut codec = PacketCodec::stream();
    for i in 0..100u16 {
        let packet: Packet = if i % 2 == 0 {
            Connect::new(format!("client-{i}")).into()
        } else {
            publish(32)
        };
        codec.encode(packet, &mut wire).unwrap();
    }
    let wire = wire.freeze();

    c.bench_function("stream_decode_100_packets", |b| {
        b.iter_batched(
            || BytesMut::from(&wire[..]),
            |mut buf| {
                let mut codec = PacketCodec::stream();
                while let Some(packet) = codec.decode(&mut buf).unwrap() {
                    criterion::black_box(packet);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_publish_encode_decode, bench_stream_decode);
criterion_main!(benches);
