//! Utility helpers

use std::net::{IpAddr, UdpSocket};

/// Best-effort LAN IPv4 discovery, used for the dev server visit URL.
///
/// Connecting a UDP socket toward a public address selects the preferred
/// outbound interface without sending any traffic.
pub fn local_ipv4() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ipv4_is_v4_when_discoverable() {
        // May legitimately be None on hosts with no route configured.
        if let Some(ip) = local_ipv4() {
            assert!(matches!(ip, IpAddr::V4(_)));
        }
    }
}
