//! Node identity and frame dispatch.
//!
//! The node's address and device type live here, owned by the caller
//! and passed into [`route`] explicitly; nothing in the engine is
//! process-global, so one process can host several independent bus
//! endpoints (and tests can run them side by side).

use crate::hwid::HardwareId;
use crate::protocol::{classify, ops, CommandKind, Frame, ADDR_UNASSIGNED};

/// A node's bus-visible identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeIdentity {
    /// Current bus address; [`ADDR_UNASSIGNED`] until provisioned.
    pub address: u8,
    /// Device type byte announced to the server.
    pub device_type: u8,
    /// Factory identifier, announced while unassigned.
    pub hardware_id: HardwareId,
}

impl NodeIdentity {
    pub const fn new(address: u8, device_type: u8, hardware_id: HardwareId) -> Self {
        Self {
            address,
            device_type,
            hardware_id,
        }
    }

    /// Rebuild identity at boot from the persisted address, falling
    /// back to unassigned.
    pub fn restore<S>(
        device_type: u8,
        hardware_id: HardwareId,
        store: &mut S,
    ) -> Result<Self, S::Error>
    where
        S: AddressStore,
    {
        let address = store.load()?.unwrap_or(ADDR_UNASSIGNED);
        Ok(Self::new(address, device_type, hardware_id))
    }

    pub const fn is_unassigned(&self) -> bool {
        self.address == ADDR_UNASSIGNED
    }

    /// The identity announcement for this node. Unassigned nodes
    /// include their hardware identifier so the server can provision
    /// them.
    pub fn hello(&self) -> Frame {
        ops::Hello {
            address: self.address,
            device_type: self.device_type,
            hardware_id: if self.is_unassigned() {
                Some(self.hardware_id)
            } else {
                None
            },
        }
        .frame()
    }
}

/// Non-volatile storage for the assigned address.
pub trait AddressStore {
    type Error;

    /// The persisted address, if one was ever saved.
    fn load(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Persist a newly adopted address.
    fn save(&mut self, address: u8) -> Result<(), Self::Error>;
}

/// Volatile [`AddressStore`] for tests and simulated nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RamStore(Option<u8>);

impl AddressStore for RamStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.0)
    }

    fn save(&mut self, address: u8) -> Result<(), Self::Error> {
        self.0 = Some(address);
        Ok(())
    }
}

/// What became of one received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Routed {
    /// Addressed to somebody else; nothing happened.
    Ignored,
    /// A core operation that needed no visible action (a HELLO or ACK
    /// overheard, an assignment with an unusable payload, or a frame
    /// with no command at all).
    Handled,
    /// A liveness probe; the caller should answer with [`ops::ack`].
    Ping,
    /// The server asked this node to restart its host.
    Reset,
    /// A new address was adopted and persisted; the contained
    /// announcement should be sent to re-introduce the node.
    AddressAssigned(Frame),
    /// Not a core operation; hand the frame to the device application
    /// layer unchanged.
    Application(Frame),
}

/// Decide what to do with a validated frame.
///
/// Address filtering happens here too: frames for other nodes come
/// back as [`Routed::Ignored`] with no side effects. Core operations
/// are acted on (address assignment mutates `node` and writes through
/// `store`); everything else is handed back for the application layer.
pub fn route<S>(frame: Frame, node: &mut NodeIdentity, store: &mut S) -> Result<Routed, S::Error>
where
    S: AddressStore,
{
    if !classify::is_for_me(frame.address, node.address) {
        return Ok(Routed::Ignored);
    }

    match classify::classify(frame.device_command) {
        Some(CommandKind::Core) => match frame.device_command {
            ops::CORE_PING => Ok(Routed::Ping),
            ops::CORE_RESET => Ok(Routed::Reset),
            ops::CORE_SET_ADDRESS => {
                let new_address = frame.params[0];
                if !classify::assignable(new_address) {
                    return Ok(Routed::Handled);
                }
                node.address = new_address;
                store.save(new_address)?;
                Ok(Routed::AddressAssigned(node.hello()))
            }
            ops::CORE_HELLO | ops::CORE_ACK => Ok(Routed::Handled),
            // core values this engine predates; the application layer
            // may know better
            _ => Ok(Routed::Application(frame)),
        },
        Some(_) => Ok(Routed::Application(frame)),
        None => {
            if frame.server_command != 0 {
                Ok(Routed::Application(frame))
            } else {
                Ok(Routed::Handled)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::{commands, ADDR_BROADCAST, ADDR_RESERVED, ADDR_SERVER};

    fn node(address: u8) -> NodeIdentity {
        NodeIdentity::new(
            address,
            commands::DeviceType::Timer as u8,
            HardwareId::new([1, 2, 3, 4, 5, 6]),
        )
    }

    #[test]
    fn restore_prefers_persisted_address() {
        let mut store = RamStore::default();
        store.save(0x0c).unwrap();

        let node =
            NodeIdentity::restore(0x04, HardwareId::new_empty(), &mut store).unwrap();
        assert_eq!(node.address, 0x0c);
    }

    #[test]
    fn restore_defaults_to_unassigned() {
        let mut store = RamStore::default();
        let node =
            NodeIdentity::restore(0x04, HardwareId::new_empty(), &mut store).unwrap();
        assert!(node.is_unassigned());
    }

    #[test]
    fn bootstrap_assignment() {
        let mut node = node(ADDR_UNASSIGNED);
        let mut store = RamStore::default();

        let frame = ops::set_address(ADDR_UNASSIGNED, 0x05);
        let routed = route(frame, &mut node, &mut store).unwrap();

        assert_eq!(node.address, 0x05);
        assert_eq!(store.load().unwrap(), Some(0x05));

        // the re-announcement carries the adopted address and, now
        // that the node is assigned, no hardware id
        match routed {
            Routed::AddressAssigned(hello) => {
                assert_eq!(hello.address, ADDR_SERVER);
                assert_eq!(hello.device_command, ops::CORE_HELLO);
                assert_eq!(hello.params[0], 0x05);
                assert_eq!(hello.params[1], commands::DeviceType::Timer as u8);
                assert!(hello.params[2..8].iter().all(|b| *b == 0));
            }
            other => panic!("expected AddressAssigned, got {:?}", other),
        }
    }

    #[test]
    fn unusable_assignment_ignored() {
        for bad in [ADDR_UNASSIGNED, ADDR_RESERVED] {
            let mut node = node(0x07);
            let mut store = RamStore::default();

            let frame = ops::set_address(0x07, bad);
            let routed = route(frame, &mut node, &mut store).unwrap();

            assert_eq!(routed, Routed::Handled);
            assert_eq!(node.address, 0x07);
            assert_eq!(store.load().unwrap(), None);
        }
    }

    #[test]
    fn broadcast_ping() {
        let mut node = node(0x07);
        let mut store = RamStore::default();

        let frame = ops::ping(ADDR_BROADCAST);
        let routed = route(frame, &mut node, &mut store).unwrap();
        assert_eq!(routed, Routed::Ping);
    }

    #[test]
    fn reset_request() {
        let mut node = node(0x07);
        let mut store = RamStore::default();
        assert_eq!(
            route(ops::reset(0x07), &mut node, &mut store).unwrap(),
            Routed::Reset
        );
    }

    #[test]
    fn other_nodes_traffic_ignored() {
        let mut node = node(0x07);
        let mut store = RamStore::default();

        let frame = ops::set_address(0x08, 0x22);
        assert_eq!(route(frame, &mut node, &mut store).unwrap(), Routed::Ignored);
        assert_eq!(node.address, 0x07);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn server_commands_forwarded_unchanged() {
        let mut node = node(0x07);
        let mut store = RamStore::default();

        let mut frame = Frame::command(0x07, commands::CMD_TMR_START);
        frame.params[0] = 0x3c;

        match route(frame, &mut node, &mut store).unwrap() {
            Routed::Application(forwarded) => assert_eq!(forwarded, frame),
            other => panic!("expected Application, got {:?}", other),
        }
    }

    #[test]
    fn events_forwarded() {
        // a server endpoint sees device events as application traffic
        let mut server = NodeIdentity::new(ADDR_SERVER, 0, HardwareId::new_empty());
        let mut store = RamStore::default();

        let mut frame = Frame::event(commands::EV_TMR_DONE);
        frame.params[0] = 1;
        match route(frame, &mut server, &mut store).unwrap() {
            Routed::Application(forwarded) => assert_eq!(forwarded, frame),
            other => panic!("expected Application, got {:?}", other),
        }
    }

    #[test]
    fn overheard_hello_and_ack_are_noops() {
        let mut server = NodeIdentity::new(ADDR_SERVER, 0, HardwareId::new_empty());
        let mut store = RamStore::default();

        let hello = node(ADDR_UNASSIGNED).hello();
        // hellos are addressed to the server; the server-side engine
        // treats them as informational (its application layer can use
        // Hello::from_frame if it cares)
        assert_eq!(
            route(hello, &mut server, &mut store).unwrap(),
            Routed::Handled
        );
        assert_eq!(
            route(ops::ack(), &mut server, &mut store).unwrap(),
            Routed::Handled
        );
    }

    #[test]
    fn unknown_core_op_forwarded() {
        let mut node = node(0x07);
        let mut store = RamStore::default();

        let mut frame = Frame::command(0x07, 0);
        frame.device_command = 0x3a;
        match route(frame, &mut node, &mut store).unwrap() {
            Routed::Application(forwarded) => assert_eq!(forwarded, frame),
            other => panic!("expected Application, got {:?}", other),
        }
    }

    #[test]
    fn empty_frame_is_a_noop() {
        let mut node = node(0x07);
        let mut store = RamStore::default();

        let frame = Frame::command(0x07, 0);
        assert_eq!(route(frame, &mut node, &mut store).unwrap(), Routed::Handled);
    }
}
