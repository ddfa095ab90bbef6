use clap::Parser;

mod common;
mod encode;
mod hexdump;
mod parsedump;
mod simulate;

trait ToolRun {
    fn run(&self) -> anyhow::Result<()>;
}

#[derive(clap::Parser, Debug)]
#[command(about = "Room Bus developer tool", version)]
struct ToolOptions {
    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(clap::Subcommand, Debug)]
enum ToolCommand {
    /// Build a frame and show its wire bytes.
    Encode(encode::EncodeOpts),
    /// Run a captured byte stream through the frame parser.
    ParseDump(parsedump::ParseDumpOpts),
    /// Pretend to be a node, on a TCP listener.
    Simulate(simulate::SimulateOpts),
}

impl ToolRun for ToolCommand {
    fn run(&self) -> anyhow::Result<()> {
        use ToolCommand::*;
        match self {
            Encode(o) => o.run(),
            ParseDump(o) => o.run(),
            Simulate(o) => o.run(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    ToolOptions::parse().command.run()
}
