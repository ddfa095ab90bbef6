use rblib::protocol::{Frame, ADDR_BROADCAST, PARAMS_LEN};

use crate::{common, hexdump};

#[derive(clap::Args, Debug)]
pub struct EncodeOpts {
    /// Destination address.
    #[arg(long, value_parser = common::parse_byte, default_value_t = ADDR_BROADCAST)]
    address: u8,

    /// Server-to-device command byte.
    #[arg(long, value_parser = common::parse_byte, default_value_t = 0)]
    server_command: u8,

    /// Core op or device-to-server event byte.
    #[arg(long, value_parser = common::parse_byte, default_value_t = 0)]
    device_command: u8,

    /// Parameter bytes as hex, zero-padded to the full block.
    #[arg(long, default_value = "")]
    params: String,
}

impl crate::ToolRun for EncodeOpts {
    fn run(&self) -> anyhow::Result<()> {
        let given = common::parse_hex(&self.params)?;
        anyhow::ensure!(
            given.len() <= PARAMS_LEN,
            "at most {} parameter bytes, got {}",
            PARAMS_LEN,
            given.len()
        );

        let mut params = [0; PARAMS_LEN];
        params[..given.len()].copy_from_slice(&given);

        let frame = Frame {
            address: self.address,
            server_command: self.server_command,
            device_command: self.device_command,
            params,
            reserved: 0,
        };

        common::print_frame(&frame);
        println!();
        hexdump::hexdump(&frame.encode());
        Ok(())
    }
}
