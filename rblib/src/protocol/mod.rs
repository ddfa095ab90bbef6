/// First byte of every wire frame.
pub const FRAME_START: u8 = 0xaa;
/// Last byte of every wire frame.
pub const FRAME_END: u8 = 0x55;

/// Length of the logical frame body: address, two command bytes,
/// parameters, reserved.
pub const BODY_LEN: usize = 24;
/// Length of a full wire frame: start, body, CRC, end.
pub const WIRE_LEN: usize = 1 + BODY_LEN + 2 + 1;
/// Length of the parameter block inside the body.
pub const PARAMS_LEN: usize = 20;

pub const BAUD_RATE: u32 = 9600;

/// Factory / pairing address, used by nodes that have not been
/// provisioned yet.
pub const ADDR_UNASSIGNED: u8 = 0x00;
/// The coordinating server.
pub const ADDR_SERVER: u8 = 0x01;
/// Every node accepts frames sent here.
pub const ADDR_BROADCAST: u8 = 0xfe;
/// Never a valid destination or assignment.
pub const ADDR_RESERVED: u8 = 0xff;

/// Lowest address a node can be assigned.
pub const ADDR_NODE_MIN: u8 = 0x02;
/// Highest address a node can be assigned.
pub const ADDR_NODE_MAX: u8 = 0xfd;

pub mod classify;
pub use classify::{classify, is_for_me, CommandKind};

pub mod commands;

pub mod crc;

pub mod frame;
pub use frame::Frame;

pub mod ops;

pub mod parse;
pub use parse::{Parser, ParserStats};
