use rblib::protocol::Parser;

use crate::common;

#[derive(clap::Args, Debug)]
pub struct ParseDumpOpts {
    /// Capture file of raw bus bytes.
    dump: String,

    /// The capture is hex text rather than binary.
    #[arg(long)]
    hex: bool,
}

impl crate::ToolRun for ParseDumpOpts {
    fn run(&self) -> anyhow::Result<()> {
        let raw = if self.hex {
            common::parse_hex(&std::fs::read_to_string(&self.dump)?)?
        } else {
            std::fs::read(&self.dump)?
        };

        let mut parser = Parser::new();

        for (offset, byte) in raw.iter().enumerate() {
            if let Some(frame) = parser.feed(*byte) {
                println!("frame ending at 0x{:04x}:", offset);
                common::print_frame(&frame);
                println!();
            }
        }

        let stats = parser.stats();
        println!(
            "{} bytes: {} frames, {} crc errors, {} framing errors, {} bytes discarded",
            raw.len(),
            stats.frames,
            stats.crc_errors,
            stats.framing_errors,
            stats.discarded,
        );
        Ok(())
    }
}
