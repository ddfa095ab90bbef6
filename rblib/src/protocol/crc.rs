use super::BODY_LEN;

/// The bus checksum: CRC-16/CCITT-FALSE (poly `0x1021`, initial value
/// `0xffff`, MSB first, no final xor), known to the `crc` registry as
/// CRC-16/IBM-3740.
///
/// It is computed over exactly the 24-byte frame body, never over the
/// delimiters or the CRC field itself, and the same algorithm runs on
/// both encode and verify.
pub const CRC_BUS: crc::Crc<u16> = crc::Crc::<u16>::new(&crc::CRC_16_IBM_3740);

/// Checksum a frame body.
pub fn checksum(body: &[u8; BODY_LEN]) -> u16 {
    CRC_BUS.checksum(body)
}
