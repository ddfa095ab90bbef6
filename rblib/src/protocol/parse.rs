//! Byte-at-a-time stream parser with resynchronization.
//!
//! The bus is shared and half-duplex, so the receive path has to treat
//! noise, partial frames, and other nodes' traffic as normal input. The
//! parser is a five-state machine fed one byte per call; any delimiter
//! or checksum mismatch silently discards the in-flight frame and waits
//! for the next start delimiter.

use super::{crc, Frame, BODY_LEN, FRAME_END, FRAME_START};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    WaitStart,
    ReadFrame,
    ReadCrcLow,
    ReadCrcHigh,
    WaitEnd,
}

/// Receive-side counters.
///
/// Purely observational: nothing in here feeds back into parsing.
/// Counters wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserStats {
    /// Complete frames decoded.
    pub frames: u32,
    /// Frames dropped on a body checksum mismatch.
    pub crc_errors: u32,
    /// Frames dropped on a wrong end delimiter.
    pub framing_errors: u32,
    /// Bytes discarded while hunting for a start delimiter.
    pub discarded: u32,
}

/// Streaming frame parser. One instance per physical receive stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parser {
    state: State,
    buf: [u8; BODY_LEN],
    idx: usize,
    rx_crc: u16,
    stats: ParserStats,
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::WaitStart,
            buf: [0; BODY_LEN],
            idx: 0,
            rx_crc: 0,
            stats: ParserStats {
                frames: 0,
                crc_errors: 0,
                framing_errors: 0,
                discarded: 0,
            },
        }
    }

    /// Receive-side counters so far.
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Abandon any partial frame and wait for a start delimiter.
    ///
    /// Counters are kept.
    pub fn reset(&mut self) {
        self.state = State::WaitStart;
        self.idx = 0;
        self.rx_crc = 0;
    }

    /// Feed one received byte.
    ///
    /// Returns a frame when this byte completed one; all failure modes
    /// return `None` and resynchronize. O(1) per byte, except for the
    /// single checksum pass over the buffered body when an end
    /// delimiter arrives.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            State::WaitStart => {
                if byte == FRAME_START {
                    self.idx = 0;
                    self.rx_crc = 0;
                    self.state = State::ReadFrame;
                } else {
                    self.stats.discarded = self.stats.discarded.wrapping_add(1);
                }
            }

            State::ReadFrame => {
                self.buf[self.idx] = byte;
                self.idx += 1;
                if self.idx >= BODY_LEN {
                    self.state = State::ReadCrcLow;
                }
            }

            State::ReadCrcLow => {
                self.rx_crc = byte as u16;
                self.state = State::ReadCrcHigh;
            }

            State::ReadCrcHigh => {
                self.rx_crc |= (byte as u16) << 8;
                self.state = State::WaitEnd;
            }

            State::WaitEnd => {
                // whatever this byte is, the next one starts over
                self.state = State::WaitStart;

                if byte != FRAME_END {
                    self.stats.framing_errors = self.stats.framing_errors.wrapping_add(1);
                } else if crc::checksum(&self.buf) != self.rx_crc {
                    self.stats.crc_errors = self.stats.crc_errors.wrapping_add(1);
                } else if let Ok((_, frame)) = Frame::parse_body(&self.buf) {
                    self.stats.frames = self.stats.frames.wrapping_add(1);
                    return Some(frame);
                }
            }
        }

        None
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
