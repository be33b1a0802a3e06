//! End-to-end exchange over a loopback UDP socket pair using `UdpFramed`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use futures::{SinkExt, StreamExt};
use mqttsn_protocol::core::codec::PacketCodec;
use mqttsn_protocol::core::packet::Packet;
use mqttsn_protocol::core::topic::TopicId;
use mqttsn_protocol::error::{Error, ProtocolError};
use mqttsn_protocol::protocol::dispatcher::Dispatcher;
use mqttsn_protocol::protocol::packet_type::PacketType;
use mqttsn_protocol::protocol::packets::*;
use mqttsn_protocol::protocol::return_code::ReturnCode;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tokio_util::udp::UdpFramed;

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_connect_register_publish() {
    let gateway_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let client_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let gateway_addr = gateway_socket.local_addr().unwrap();

    let mut gateway = UdpFramed::new(gateway_socket, PacketCodec::datagram());
    let mut client = UdpFramed::new(client_socket, PacketCodec::datagram());

    let dispatcher = Dispatcher::new();
    dispatcher
        .register(PacketType::Connect, |_| {
            Ok(Some(Connack::new(ReturnCode::Accepted).into()))
        })
        .unwrap();
    dispatcher
        .register(PacketType::Register, |packet| match packet {
            Packet::Register(register) => Ok(Some(
                Regack {
                    topic_id: 0x0042,
                    msg_id: register.msg_id,
                    return_code: ReturnCode::Accepted,
                }
                .into(),
            )),
            _ => Ok(None),
        })
        .unwrap();
    dispatcher
        .register(PacketType::Publish, |_| Ok(None))
        .unwrap();

    let server = tokio::spawn(async move {
        let mut received = Vec::new();
        while received.len() < 3 {
            let (packet, peer) = gateway.next().await.unwrap().unwrap();
            if let Some(reply) = dispatcher.dispatch(&packet).unwrap() {
                gateway.send((reply, peer)).await.unwrap();
            }
            received.push(packet);
        }
        received
    });

    client
        .send((Connect::new("loopback").into(), gateway_addr))
        .await
        .unwrap();
    let (reply, _) = timeout(WAIT, client.next()).await.unwrap().unwrap().unwrap();
    match reply {
        Packet::Connack(connack) => assert!(connack.return_code.is_accepted()),
        other => panic!("expected CONNACK, got {other:?}"),
    }

    client
        .send((Register::new(0, 7, "room/light").into(), gateway_addr))
        .await
        .unwrap();
    let (reply, _) = timeout(WAIT, client.next()).await.unwrap().unwrap().unwrap();
    let topic_id = match reply {
        Packet::Regack(regack) => {
            assert_eq!(regack.msg_id, 7);
            regack.topic_id
        }
        other => panic!("expected REGACK, got {other:?}"),
    };

    client
        .send((
            Publish::new(TopicId::Normal(topic_id), "on").into(),
            gateway_addr,
        ))
        .await
        .unwrap();

    let received = timeout(WAIT, server).await.unwrap().unwrap();
    assert_eq!(received.len(), 3);
    match &received[2] {
        Packet::Publish(publish) => {
            assert_eq!(publish.topic_id, TopicId::Normal(0x0042));
            assert_eq!(&publish.data[..], b"on");
        }
        other => panic!("expected PUBLISH, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_datagram_is_reported() {
    let gateway_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let raw_client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let gateway_addr = gateway_socket.local_addr().unwrap();

    let mut gateway = UdpFramed::new(gateway_socket, PacketCodec::datagram());

    raw_client.send_to(b"\x02\x1834567", gateway_addr).await.unwrap();
    let err = timeout(WAIT, gateway.next()).await.unwrap().unwrap().unwrap_err();
    assert!(matches!(
        err,
        Error::Protocol(ProtocolError::LengthMismatch {
            declared: 2,
            actual: 7
        })
    ));

    raw_client.send_to(b"\x02\x16", gateway_addr).await.unwrap();
    let (packet, _) = timeout(WAIT, gateway.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(packet, Packet::Pingreq(Pingreq::new()));
}
