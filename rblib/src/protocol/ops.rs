//! Core operations: the small command vocabulary the engine itself
//! understands, and the one payload it constructs on its own.

use crate::hwid::{HardwareId, HWID_LEN};

use super::frame::parse_array;
use super::{Frame, ADDR_UNASSIGNED, PARAMS_LEN};

/// Identity announcement, sent after power-up and after adopting a new
/// address.
pub const CORE_HELLO: u8 = 0x01;
/// Acknowledgement for a core request.
pub const CORE_ACK: u8 = 0x02;
/// Liveness probe; answered with [`CORE_ACK`].
pub const CORE_PING: u8 = 0x03;
/// Ask the node to restart its host. Intentional, not an error.
pub const CORE_RESET: u8 = 0x04;
/// Assign a bus address; the new address rides in `params[0]`.
pub const CORE_SET_ADDRESS: u8 = 0x05;

/// The [`CORE_HELLO`] parameter payload.
///
/// `params[0]` carries the sender's current address and `params[1]` its
/// device type. An unassigned sender additionally fills `params[2..8]`
/// with its hardware identifier so the server can provision an address
/// for it; assigned senders leave those bytes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hello {
    pub address: u8,
    pub device_type: u8,
    pub hardware_id: Option<HardwareId>,
}

impl Hello {
    /// Parse an announcement out of a parameter block.
    pub fn parse_params(input: &[u8]) -> nom::IResult<&[u8], Self> {
        let (input, address) = nom::number::complete::u8(input)?;
        let (input, device_type) = nom::number::complete::u8(input)?;
        let (input, id): (_, [u8; HWID_LEN]) = parse_array(nom::number::complete::u8)(input)?;

        let hardware_id = if address == ADDR_UNASSIGNED {
            Some(HardwareId::new(id))
        } else {
            None
        };

        Ok((
            input,
            Hello {
                address,
                device_type,
                hardware_id,
            },
        ))
    }

    /// Read an announcement out of a received frame, if it is one.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        if frame.device_command != CORE_HELLO {
            return None;
        }
        Self::parse_params(&frame.params).ok().map(|(_, hello)| hello)
    }

    /// Write this announcement into a parameter block.
    pub fn write_params(&self, params: &mut [u8; PARAMS_LEN]) {
        params[0] = self.address;
        params[1] = self.device_type;
        if let Some(ref id) = self.hardware_id {
            params[2..2 + HWID_LEN].copy_from_slice(id.as_bytes());
        }
    }

    /// Build the announcement frame, addressed to the server.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::event(CORE_HELLO);
        self.write_params(&mut frame.params);
        frame
    }
}

/// Build an acknowledgement frame, addressed to the server.
pub fn ack() -> Frame {
    Frame::event(CORE_ACK)
}

/// Build a liveness probe for a node. Server side.
pub fn ping(address: u8) -> Frame {
    let mut frame = Frame::command(address, 0);
    frame.device_command = CORE_PING;
    frame
}

/// Build a restart request for a node. Server side.
pub fn reset(address: u8) -> Frame {
    let mut frame = Frame::command(address, 0);
    frame.device_command = CORE_RESET;
    frame
}

/// Build an address assignment for a node. Server side; `address` is
/// usually [`ADDR_UNASSIGNED`] during bootstrap.
pub fn set_address(address: u8, new_address: u8) -> Frame {
    let mut frame = Frame::command(address, 0);
    frame.device_command = CORE_SET_ADDRESS;
    frame.params[0] = new_address;
    frame
}
