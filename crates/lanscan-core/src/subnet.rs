//! Subnet address helpers

use std::net::Ipv4Addr;

/// Broadcast address for the network containing `ip`.
///
/// Replaces the last octet with 255, which is only correct on a /24. The
/// netmask reported by the interface listing is not consulted.
pub fn broadcast_address(ip: Ipv4Addr) -> Ipv4Addr {
    let [a, b, c, _] = ip.octets();
    Ipv4Addr::new(a, b, c, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_replaces_last_octet() {
        let ip = Ipv4Addr::new(192, 168, 0, 10);
        assert_eq!(broadcast_address(ip), Ipv4Addr::new(192, 168, 0, 255));
    }

    #[test]
    fn test_broadcast_ignores_wider_networks() {
        // A 10.0.0.0/8 host still gets a /24 broadcast
        let ip = Ipv4Addr::new(10, 1, 2, 3);
        assert_eq!(broadcast_address(ip).to_string(), "10.1.2.255");
    }

    #[test]
    fn test_broadcast_of_broadcast_is_stable() {
        let ip = Ipv4Addr::new(172, 16, 5, 255);
        assert_eq!(broadcast_address(ip), ip);
    }
}
