use rblib::protocol::{classify, commands, ops, CommandKind, Frame};
use rblib::protocol::{ADDR_BROADCAST, ADDR_RESERVED, ADDR_SERVER, ADDR_UNASSIGNED};

/// Parse a byte argument, accepting `0x`-prefixed hex or decimal.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("not a byte value: {}", s))
}

/// Parse a hex blob like `"0102ff"` or `"01 02 ff"`.
pub fn parse_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    anyhow::ensure!(compact.len() % 2 == 0, "odd number of hex digits");

    let mut out = Vec::with_capacity(compact.len() / 2);
    for pair in compact.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(pair)?;
        out.push(
            u8::from_str_radix(pair, 16)
                .map_err(|_| anyhow::anyhow!("not hex digits: {}", pair))?,
        );
    }
    Ok(out)
}

pub fn address_name(address: u8) -> String {
    match address {
        ADDR_UNASSIGNED => "unassigned".to_owned(),
        ADDR_SERVER => "server".to_owned(),
        ADDR_BROADCAST => "broadcast".to_owned(),
        ADDR_RESERVED => "reserved".to_owned(),
        node => format!("node 0x{:02x}", node),
    }
}

fn command_name(command: u8) -> String {
    let kind = match classify(command) {
        None => return "-".to_owned(),
        Some(CommandKind::Core) => match command {
            ops::CORE_HELLO => return "core HELLO".to_owned(),
            ops::CORE_ACK => return "core ACK".to_owned(),
            ops::CORE_PING => return "core PING".to_owned(),
            ops::CORE_RESET => return "core RESET".to_owned(),
            ops::CORE_SET_ADDRESS => return "core SET_ADDRESS".to_owned(),
            _ => "core",
        },
        Some(CommandKind::Server) => "server",
        Some(CommandKind::Event) => "event",
    };
    format!("{} 0x{:02x}", kind, command)
}

/// One-frame summary, multi-line.
pub fn print_frame(frame: &Frame) {
    println!(
        "  to {}   server-cmd {}   device-cmd {}",
        address_name(frame.address),
        command_name(frame.server_command),
        command_name(frame.device_command),
    );

    if let Some(hello) = ops::Hello::from_frame(frame) {
        let typ = commands::DeviceType::from_u8(hello.device_type)
            .map(|t| t.name().to_owned())
            .unwrap_or_else(|| format!("type 0x{:02x}", hello.device_type));
        match hello.hardware_id {
            Some(id) => println!("  announce: {} ({}), hw {}", address_name(hello.address), typ, id),
            None => println!("  announce: {} ({})", address_name(hello.address), typ),
        }
    }

    if frame.params.iter().any(|b| *b != 0) {
        let hex: Vec<String> = frame.params.iter().map(|b| format!("{:02x}", b)).collect();
        println!("  params {}", hex.join(" "));
    }
}
