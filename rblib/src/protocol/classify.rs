//! Address and command classification.
//!
//! Pure predicates over single bytes; the node's own address is passed
//! in explicitly so several independent bus endpoints can coexist in
//! one process.

use super::{ADDR_BROADCAST, ADDR_RESERVED, ADDR_UNASSIGNED};

/// Lowest core operation.
pub const CMD_CORE_MIN: u8 = 0x01;
/// Highest core operation.
pub const CMD_CORE_MAX: u8 = 0x3f;

/// Lowest server-to-device command.
pub const CMD_SERVER_MIN: u8 = 0x40;
/// Highest server-to-device command.
pub const CMD_SERVER_MAX: u8 = 0x7f;

/// Lowest device-to-server event.
pub const CMD_EVENT_MIN: u8 = 0x80;
/// Highest device-to-server event.
pub const CMD_EVENT_MAX: u8 = 0xff;

/// Which range a command byte falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Interoperability operations handled by the engine itself.
    Core,
    /// Device-type-specific commands issued by the server.
    Server,
    /// Device-to-server events and errors.
    Event,
}

/// Classify a command byte. `0x00` means "not present" and has no
/// classification.
pub const fn classify(command: u8) -> Option<CommandKind> {
    match command {
        0x00 => None,
        CMD_CORE_MIN..=CMD_CORE_MAX => Some(CommandKind::Core),
        CMD_SERVER_MIN..=CMD_SERVER_MAX => Some(CommandKind::Server),
        CMD_EVENT_MIN..=CMD_EVENT_MAX => Some(CommandKind::Event),
    }
}

/// Does a frame addressed to `address` concern a node at `my_address`?
///
/// True on an exact match or a broadcast. An unassigned node
/// (`my_address == 0x00`) matching `address == 0x00` is the exact-match
/// case: that is how bootstrap traffic reaches nodes that have no
/// address yet.
pub const fn is_for_me(address: u8, my_address: u8) -> bool {
    address == my_address || address == ADDR_BROADCAST
}

/// Is this a plausible destination for provisioning, i.e. neither the
/// unassigned placeholder nor the reserved address?
pub const fn assignable(address: u8) -> bool {
    address != ADDR_UNASSIGNED && address != ADDR_RESERVED
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::{ADDR_RESERVED, ADDR_SERVER};

    #[test]
    fn zero_is_absent() {
        assert_eq!(classify(0x00), None);
    }

    #[test]
    fn range_edges() {
        assert_eq!(classify(0x01), Some(CommandKind::Core));
        assert_eq!(classify(0x3f), Some(CommandKind::Core));
        assert_eq!(classify(0x40), Some(CommandKind::Server));
        assert_eq!(classify(0x7f), Some(CommandKind::Server));
        assert_eq!(classify(0x80), Some(CommandKind::Event));
        assert_eq!(classify(0xff), Some(CommandKind::Event));
    }

    #[test]
    fn every_nonzero_byte_classifies_once() {
        for command in 1..=u8::MAX {
            let kind = classify(command);
            assert!(kind.is_some(), "0x{:02x} unclassified", command);
        }
    }

    #[test]
    fn for_me_exact_and_broadcast() {
        assert!(is_for_me(0x07, 0x07));
        assert!(is_for_me(ADDR_BROADCAST, 0x07));
        assert!(is_for_me(ADDR_BROADCAST, ADDR_UNASSIGNED));
        assert!(!is_for_me(0x08, 0x07));
        assert!(!is_for_me(ADDR_SERVER, 0x07));
    }

    #[test]
    fn for_me_bootstrap() {
        // an unassigned node listens for its own provisioning traffic
        assert!(is_for_me(ADDR_UNASSIGNED, ADDR_UNASSIGNED));
        assert!(!is_for_me(ADDR_UNASSIGNED, 0x07));
    }

    #[test]
    fn assignable_excludes_placeholders() {
        assert!(!assignable(ADDR_UNASSIGNED));
        assert!(!assignable(ADDR_RESERVED));
        assert!(assignable(0x02));
        assert!(assignable(0xfd));
    }

    #[cfg(feature = "std")]
    mod props {
        use super::*;
        use quickcheck_macros::quickcheck;

        #[quickcheck]
        fn for_me_is_pure(address: u8, my_address: u8) -> bool {
            is_for_me(address, my_address) == is_for_me(address, my_address)
        }

        #[quickcheck]
        fn broadcast_always_matches(my_address: u8) -> bool {
            is_for_me(ADDR_BROADCAST, my_address)
        }
    }
}
