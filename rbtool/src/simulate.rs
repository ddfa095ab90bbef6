use rblib::protocol::{ops, ADDR_UNASSIGNED};
use rblib::{
    route, AddressStore, Bus, BusError, FromStd, HardwareId, NodeIdentity, RamStore, Routed,
};

use crate::common;

#[derive(clap::Args, Debug)]
pub struct SimulateOpts {
    #[arg(default_value = "localhost:8855")]
    bind: String,

    /// Starting address; default is factory-fresh.
    #[arg(long, value_parser = common::parse_byte, default_value_t = ADDR_UNASSIGNED)]
    address: u8,

    /// Device type byte to announce.
    #[arg(long, value_parser = common::parse_byte, default_value_t = 0x04)]
    device_type: u8,

    /// Six-byte hardware identifier, as hex.
    #[arg(long, default_value = "0decafc0ffee")]
    hardware_id: String,
}

impl crate::ToolRun for SimulateOpts {
    fn run(&self) -> anyhow::Result<()> {
        let id = common::parse_hex(&self.hardware_id)?;
        let id = HardwareId::new_from_bytes(&id)
            .ok_or_else(|| anyhow::anyhow!("hardware id must be 6 bytes"))?;

        let mut store = RamStore::default();
        if self.address != ADDR_UNASSIGNED {
            store.save(self.address)?;
        }

        let listener = std::net::TcpListener::bind(&self.bind)?;
        eprintln!("Listening on {}.", self.bind);

        loop {
            let (stream, addr) = listener.accept()?;
            eprintln!("Connected to {}.", addr);

            // a low timeout keeps the receive loop responsive to
            // disconnects
            stream.set_read_timeout(Some(std::time::Duration::from_secs(1)))?;

            match Simulator::new(self, id, &mut store, stream)?.simulate() {
                Err(e) => match e.downcast_ref::<std::io::Error>().map(|e| e.kind()) {
                    // an expected error, at disconnect
                    Some(std::io::ErrorKind::UnexpectedEof) => {
                        eprintln!("Disconnected from {}.", addr);
                        continue;
                    }
                    // any other error is unexpected
                    _ => anyhow::bail!(e),
                },
                Ok(()) => {}
            }
        }
    }
}

struct Simulator<'a> {
    bus: Bus<FromStd<std::net::TcpStream>>,
    node: NodeIdentity,
    store: &'a mut RamStore,
}

impl<'a> Simulator<'a> {
    fn new(
        opts: &SimulateOpts,
        id: HardwareId,
        store: &'a mut RamStore,
        stream: std::net::TcpStream,
    ) -> anyhow::Result<Self> {
        let node = NodeIdentity::restore(opts.device_type, id, store)?;
        Ok(Self {
            bus: Bus::new(FromStd::new(stream)),
            node,
            store,
        })
    }

    fn simulate(&mut self) -> anyhow::Result<()> {
        // a node introduces itself when it comes up
        self.bus.send(&self.node.hello())?;
        eprintln!("Announced as {}.", common::address_name(self.node.address));

        loop {
            let frame = match self.bus.receive() {
                Ok(frame) => frame,
                Err(BusError::UnexpectedEof) => {
                    anyhow::bail!(std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
                }
                Err(BusError::Io(e)) => {
                    if let std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock = e.kind()
                    {
                        // try again if timed out
                        continue;
                    }
                    anyhow::bail!(e);
                }
            };

            match route(frame, &mut self.node, self.store)? {
                Routed::Ignored => {}
                Routed::Handled => {}
                Routed::Ping => {
                    eprintln!("Ping; acknowledging.");
                    self.bus.send(&ops::ack())?;
                }
                Routed::Reset => {
                    // a real node reboots here; come back up with the
                    // persisted identity and re-announce
                    eprintln!("Reset requested; restarting.");
                    self.node = NodeIdentity::restore(
                        self.node.device_type,
                        self.node.hardware_id,
                        self.store,
                    )?;
                    self.bus.send(&self.node.hello())?;
                }
                Routed::AddressAssigned(hello) => {
                    eprintln!(
                        "Assigned address; now {}.",
                        common::address_name(self.node.address)
                    );
                    self.bus.send(&hello)?;
                }
                Routed::Application(frame) => {
                    eprintln!("Application frame:");
                    common::print_frame(&frame);
                }
            }
        }
    }
}
