//! Numeric host interpretation
//!
//! Hosts without a known public suffix get a second chance as IP addresses.
//! Canonical dotted-decimal and IPv6 forms are accepted as is. Anything else
//! that still decodes to an IPv4 address (`127.1`, `0x7f.0.0.1`,
//! `2130706433`) is reported as obscured, which is a common way to hide the
//! real target of a link.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Longest textual form an address can take (`INET6_ADDRSTRLEN`).
const MAX_ADDR_LEN: usize = 46;

/// Result of a successful numeric interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericHost {
    /// Strict IPv4 or IPv6 literal
    Canonical(IpAddr),
    /// Lenient IPv4 notation
    Obscured(Ipv4Addr),
}

impl NumericHost {
    pub fn addr(&self) -> IpAddr {
        match self {
            NumericHost::Canonical(addr) => *addr,
            NumericHost::Obscured(v4) => IpAddr::V4(*v4),
        }
    }

    pub fn is_obscured(&self) -> bool {
        matches!(self, NumericHost::Obscured(_))
    }

    /// Canonical text of the address.
    pub fn to_canonical(&self) -> String {
        self.addr().to_string()
    }
}

/// Try to interpret a host as an IP address.
pub fn parse_numeric_host(host: &[u8]) -> Option<NumericHost> {
    let mut host = host;

    if host.len() >= 2 && host[0] == b'[' && host[host.len() - 1] == b']' {
        host = &host[1..host.len() - 1];
    }
    while let Some((&b'.', rest)) = host.split_last() {
        host = rest;
    }

    if host.is_empty() || host.len() > MAX_ADDR_LEN {
        return None;
    }

    let text = std::str::from_utf8(host).ok()?;

    if let Ok(v4) = text.parse::<Ipv4Addr>() {
        return Some(NumericHost::Canonical(IpAddr::V4(v4)));
    }
    if let Ok(v6) = text.parse::<Ipv6Addr>() {
        return Some(NumericHost::Canonical(IpAddr::V6(v6)));
    }

    parse_obscured_ipv4(host).map(NumericHost::Obscured)
}

/// Parse an unsigned integer the way `strtoul(.., 0)` does for a whole token:
/// `0x` prefix for hex, leading `0` for octal, decimal otherwise. An empty
/// token reads as zero. Values wider than 32 bits are truncated.
fn parse_component(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return Some(0);
    }

    let (digits, radix) = if token.len() > 2 && (token.starts_with(b"0x") || token.starts_with(b"0X")) {
        (&token[2..], 16)
    } else if token.len() > 1 && token[0] == b'0' {
        (&token[1..], 8)
    } else {
        (token, 10)
    };

    if !digits.iter().all(|&b| (b as char).is_digit(radix)) {
        return None;
    }

    let text = std::str::from_utf8(digits).ok()?;
    let value = u64::from_str_radix(text, radix).unwrap_or(u64::MAX);

    Some(value as u32)
}

/// Reassemble 1 to 4 dot-separated components into an IPv4 address.
///
/// Each non-final component contributes the octets it needs, the final one
/// fills all remaining low-order bytes: `192.168.1` is `192.168.0.1` and
/// `127.1` is `127.0.0.1`.
fn parse_obscured_ipv4(host: &[u8]) -> Option<Ipv4Addr> {
    let end = host.len();
    // Address bytes in network order, byte k lives at bits 8k..8k+8.
    let mut addr: u32 = 0;
    let mut component_start = 0;
    let mut dots = 0;
    let mut shift: u32 = 0;
    let mut value: u32 = 0;
    let mut octets: u32 = 0;

    for p in 0..=end {
        let at_dot = p < end && host[p] == b'.';
        if shift >= 32 || !((at_dot && dots < 3) || (p == end && dots <= 3)) {
            continue;
        }

        let token = &host[component_start..p];
        component_start = p + 1;
        if at_dot {
            dots += 1;
        }

        value = parse_component(token)?;

        // Zero still occupies one octet
        let mut next_shift = if value == 0 { shift + 8 } else { shift };
        octets = 0;
        while octets < 4 && (value >> (8 * octets)) > 0 {
            next_shift += 8;
            octets += 1;
        }

        value = match octets {
            4 => value.swap_bytes(),
            3 => (value & 0x00FF_FFFF).swap_bytes() >> 8,
            2 => u32::from(((value & 0xFFFF) as u16).swap_bytes()),
            _ => value & 0xFF,
        };

        if p != end {
            addr |= value << shift;
            shift = next_shift;
        }
    }

    addr |= value.checked_shl(8 * (4 - octets)).unwrap_or(0);

    let [a, b, c, d] = addr.to_le_bytes();
    Some(Ipv4Addr::new(a, b, c, d))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lenient_forms(addr: Ipv4Addr) -> Vec<String> {
        let [a, b, c, d] = addr.octets().map(u32::from);
        let n = u32::from(addr);

        vec![
            n.to_string(),
            format!("0x{:x}", n),
            format!("0x{:x}.0x{:x}.0x{:x}.0x{:x}", a, b, c, d),
            format!("0{:o}.0{:o}.0{:o}.0{:o}", a, b, c, d),
            format!("{}.{}.{}", a, b, c * 256 + d),
            format!("{}.{}", a, b * 65536 + c * 256 + d),
        ]
    }

    proptest! {
        #[test]
        fn dotted_quad_is_canonical(octets in any::<[u8; 4]>()) {
            let addr = Ipv4Addr::from(octets);
            let text = addr.to_string();

            let parsed = parse_numeric_host(text.as_bytes());
            prop_assert_eq!(parsed, Some(NumericHost::Canonical(IpAddr::V4(addr))));
            prop_assert_eq!(parsed.map(|p| p.to_canonical()), Some(text));
        }

        #[test]
        fn lenient_forms_resolve_to_same_address(octets in any::<[u8; 4]>()) {
            let addr = Ipv4Addr::from(octets);

            for form in lenient_forms(addr) {
                let parsed = parse_numeric_host(form.as_bytes());
                prop_assert_eq!(parsed, Some(NumericHost::Obscured(addr)), "{}", form);
            }
        }
    }
}
