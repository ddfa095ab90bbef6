//! The frame model and its wire encoding.

use super::{crc, ADDR_SERVER, BODY_LEN, FRAME_END, FRAME_START, PARAMS_LEN, WIRE_LEN};

/// One bus message.
///
/// By convention exactly one of [`server_command`](Self::server_command)
/// and [`device_command`](Self::device_command) is non-zero, but this is
/// a producer-side convention only; the wire format carries both bytes
/// and decoding accepts any combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Destination address.
    pub address: u8,
    /// Server-to-device command, `0` when not used.
    pub server_command: u8,
    /// Core operation or device-to-server event, `0` when not used.
    pub device_command: u8,
    /// Command parameters, unused slots are zero.
    pub params: [u8; PARAMS_LEN],
    /// Future flags / sequence numbers. Always zero on encode, ignored
    /// (not rejected) on decode.
    pub reserved: u8,
}

impl Frame {
    /// A device-to-server frame (events, identity announcements, acks).
    pub const fn event(device_command: u8) -> Self {
        Self {
            address: ADDR_SERVER,
            server_command: 0,
            device_command,
            params: [0; PARAMS_LEN],
            reserved: 0,
        }
    }

    /// A server-to-device frame.
    pub const fn command(address: u8, server_command: u8) -> Self {
        Self {
            address,
            server_command,
            device_command: 0,
            params: [0; PARAMS_LEN],
            reserved: 0,
        }
    }

    /// Serialize the logical body, in wire order.
    pub fn body(&self) -> [u8; BODY_LEN] {
        let mut body = [0; BODY_LEN];
        body[0] = self.address;
        body[1] = self.server_command;
        body[2] = self.device_command;
        body[3..3 + PARAMS_LEN].copy_from_slice(&self.params);
        body[BODY_LEN - 1] = self.reserved;
        body
    }

    /// Parse a logical body.
    pub fn parse_body(input: &[u8]) -> nom::IResult<&[u8], Self> {
        let (input, address) = nom::number::complete::u8(input)?;
        let (input, server_command) = nom::number::complete::u8(input)?;
        let (input, device_command) = nom::number::complete::u8(input)?;
        let (input, params) = parse_array(nom::number::complete::u8)(input)?;
        let (input, reserved) = nom::number::complete::u8(input)?;

        Ok((
            input,
            Frame {
                address,
                server_command,
                device_command,
                params,
                reserved,
            },
        ))
    }

    /// Encode into a full wire frame: start delimiter, body, CRC (low
    /// byte first), end delimiter. Infallible, no allocation.
    pub fn encode(&self) -> [u8; WIRE_LEN] {
        let body = self.body();
        let crc = crc::checksum(&body);

        let mut wire = [0; WIRE_LEN];
        wire[0] = FRAME_START;
        wire[1..1 + BODY_LEN].copy_from_slice(&body);
        wire[1 + BODY_LEN] = (crc & 0xff) as u8;
        wire[2 + BODY_LEN] = (crc >> 8) as u8;
        wire[WIRE_LEN - 1] = FRAME_END;
        wire
    }
}

/// Parse a statically-sized array with a parser.
pub fn parse_array<'a, P, A, const LEN: usize>(
    parser: P,
) -> impl FnMut(&'a [u8]) -> nom::IResult<&'a [u8], [A; LEN]>
where
    P: Fn(&'a [u8]) -> nom::IResult<&'a [u8], A>,
    A: Default + Copy,
{
    move |input| {
        let mut data = [A::default(); LEN];
        let (input, _) = nom::multi::fill(&parser, &mut data[..])(input)?;
        Ok((input, data))
    }
}
