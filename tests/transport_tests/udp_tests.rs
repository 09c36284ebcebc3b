//! UDP Transport Tests
//!
//! Sends to a socket bound on loopback and checks the datagrams arrive
//! intact, one per packet.

use std::net::UdpSocket;
use std::time::Duration;

use slider_osc::protocol::{decode, encode_message};
use slider_osc::{Endpoint, Message, SliderError, Transport, UdpTransport};

// =============================================================================
// Helper Functions
// =============================================================================

fn listener() -> (UdpSocket, Endpoint) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, Endpoint::new("127.0.0.1", port))
}

fn receive(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 1024];
    let (n, _) = socket.recv_from(&mut buf).unwrap();
    buf[..n].to_vec()
}

// =============================================================================
// Send Tests
// =============================================================================

#[test]
fn test_send_delivers_one_datagram() {
    let (socket, endpoint) = listener();
    let transport = UdpTransport::new(endpoint);

    let message = Message::new("/pan").arg(0.2f32);
    let packet = encode_message(&message).unwrap();
    transport.send(&packet).unwrap();

    let received = receive(&socket);
    assert_eq!(received, packet.to_vec());
    assert_eq!(decode(&received).unwrap(), message);
}

#[test]
fn test_each_send_is_its_own_datagram() {
    let (socket, endpoint) = listener();
    let transport = UdpTransport::new(endpoint);

    let first = encode_message(&Message::new("/slide/jog").arg(0.5f32)).unwrap();
    let second = encode_message(&Message::new("/preset/recall").arg(1i32).arg(2.0f32)).unwrap();
    transport.send(&first).unwrap();
    transport.send(&second).unwrap();

    assert_eq!(receive(&socket), first.to_vec());
    assert_eq!(receive(&socket), second.to_vec());
}

#[test]
fn test_unresolvable_host_is_transport_error() {
    let transport = UdpTransport::new(Endpoint::new("no-such-host.invalid", 8000));
    let result = transport.send(b"/pan\0\0\0\0,\0\0\0");

    match result {
        Err(SliderError::Transport { endpoint, .. }) => {
            assert_eq!(endpoint, "no-such-host.invalid:8000");
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

// =============================================================================
// Probe Tests
// =============================================================================

#[test]
fn test_probe_loopback() {
    let (socket, endpoint) = listener();
    let port = endpoint.port();
    let transport = UdpTransport::new(endpoint);

    let addr = transport.probe().unwrap();
    assert_eq!(addr.port(), port);
    assert!(addr.ip().is_loopback());

    // Probing sends nothing
    socket
        .set_read_timeout(Some(Duration::from_millis(100)))
        .unwrap();
    let mut buf = [0u8; 16];
    assert!(socket.recv_from(&mut buf).is_err());
}

#[test]
fn test_probe_unresolvable_host() {
    let transport = UdpTransport::new(Endpoint::new("no-such-host.invalid", 8000));
    assert!(matches!(
        transport.probe(),
        Err(SliderError::Transport { .. })
    ));
}
