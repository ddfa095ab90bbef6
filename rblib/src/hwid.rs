/// Length of a hardware identifier.
pub const HWID_LEN: usize = 6;

/// A factory-burned identifier, unique per node.
///
/// Carried in identity announcements from unassigned nodes so the
/// server can tell freshly powered devices apart before they have bus
/// addresses.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Default)]
pub struct HardwareId([u8; HWID_LEN]);

impl HardwareId {
    pub const fn new_empty() -> Self {
        Self([0; HWID_LEN])
    }

    pub const fn new(data: [u8; HWID_LEN]) -> Self {
        Self(data)
    }

    pub fn new_from_bytes(bytes: &[u8]) -> Option<Self> {
        let mut data = [0; HWID_LEN];
        if bytes.len() != HWID_LEN {
            return None;
        }
        data.copy_from_slice(bytes);
        Some(Self(data))
    }

    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl core::fmt::Display for HardwareId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for HardwareId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "HardwareId({})", self)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HardwareId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "HardwareId({})", self.as_bytes());
    }
}

impl core::ops::Deref for HardwareId {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}
