//! Device types and the device-specific command vocabulary.
//!
//! The engine carries these values without interpreting them; parameter
//! meanings are a per-command schema between the server and each device
//! type's application layer.

/// Installed device types, announced in the second HELLO parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceType {
    GlowButton = 0x01,
    NumBox = 0x02,
    GlowDots = 0x03,
    Timer = 0x04,
    Qb = 0x05,
    Terminal = 0x06,
    RgbMixer = 0x07,
    Bomb = 0x08,
    Screen = 0x09,
    Actuator = 0x0a,
    GlowBall = 0x0b,
    GlowGate = 0x0c,
    Wall = 0x0d,
    FinalOrder = 0x0e,
    Incentives = 0x0f,
    Puzzle = 0x10,
}

impl DeviceType {
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x01 => Self::GlowButton,
            0x02 => Self::NumBox,
            0x03 => Self::GlowDots,
            0x04 => Self::Timer,
            0x05 => Self::Qb,
            0x06 => Self::Terminal,
            0x07 => Self::RgbMixer,
            0x08 => Self::Bomb,
            0x09 => Self::Screen,
            0x0a => Self::Actuator,
            0x0b => Self::GlowBall,
            0x0c => Self::GlowGate,
            0x0d => Self::Wall,
            0x0e => Self::FinalOrder,
            0x0f => Self::Incentives,
            0x10 => Self::Puzzle,
            _ => return None,
        })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::GlowButton => "GlowButton",
            Self::NumBox => "NumBox",
            Self::GlowDots => "GlowDots",
            Self::Timer => "Timer",
            Self::Qb => "QB",
            Self::Terminal => "Terminal",
            Self::RgbMixer => "RGBMixer",
            Self::Bomb => "Bomb",
            Self::Screen => "Screen",
            Self::Actuator => "Actuator",
            Self::GlowBall => "GlowBall",
            Self::GlowGate => "GlowGate",
            Self::Wall => "TheWall",
            Self::FinalOrder => "FinalOrder",
            Self::Incentives => "Incentives",
            Self::Puzzle => "Puzzle",
        }
    }
}

// Server-to-device commands (0x40..=0x7f).

// Glow Button
pub const CMD_GLOW_SET_COLOR: u8 = 0x40;

// Num Box
pub const CMD_NUM_SET_DIGIT_COLOR: u8 = 0x41;
pub const CMD_NUM_SET_DIGIT_VAL: u8 = 0x42;
pub const CMD_NUM_SET_ROW_NUM: u8 = 0x43;

// Glow Dots
pub const CMD_DOTS_SET_COLORS: u8 = 0x44;
pub const CMD_DOTS_SET_MOVE: u8 = 0x45;
pub const CMD_DOTS_SET_DELAY: u8 = 0x46;
pub const CMD_DOTS_SET_LED: u8 = 0x47;

// Timer
pub const CMD_TMR_SET_COLOR: u8 = 0x48;
pub const CMD_TMR_SET_VALUE: u8 = 0x49;
pub const CMD_TMR_START: u8 = 0x4a;
pub const CMD_TMR_PAUSE: u8 = 0x4b;

// QB
pub const CMD_QB_SET_COLORS: u8 = 0x4c;
pub const CMD_QB_SET_MODES: u8 = 0x4d;

// Terminal
pub const CMD_TERM_RESET: u8 = 0x4e;

// Bomb
pub const CMD_BOMB_SET_STATE: u8 = 0x50;

// Screen
pub const CMD_SCR_LOAD: u8 = 0x51;
pub const CMD_SCR_SHOW: u8 = 0x52;
pub const CMD_SCR_OFF: u8 = 0x53;

// Actuator
pub const CMD_ACT_OPEN: u8 = 0x54;
pub const CMD_ACT_CLOSE: u8 = 0x55;

// Glow Ball
pub const CMD_BALL_ACTIVATE: u8 = 0x56;

// Final Order
pub const CMD_FINAL_RESET: u8 = 0x57;

// Incentives
pub const CMD_INC_SET_VALUE: u8 = 0x58;
pub const CMD_INC_SET_EFFECT: u8 = 0x59;
pub const CMD_INC_SET_MODE: u8 = 0x5a;

// Puzzle
pub const CMD_PUZZLE_RESET: u8 = 0x5b;

// Device-to-server events (0x80..=0xff).

pub const EV_GLOW_PRESSED: u8 = 0x80;
pub const EV_TMR_DONE: u8 = 0x81;
pub const EV_QB_PRESSED: u8 = 0x82;
pub const EV_TERM_CODE: u8 = 0x83;
pub const EV_MIXER_RGB: u8 = 0x84;
pub const EV_BALL_ACTIVE: u8 = 0x85;
pub const EV_GATE_DETECT: u8 = 0x86;
pub const EV_GATE_BYPASS: u8 = 0x87;
pub const EV_WALL_HIT: u8 = 0x88;
pub const EV_FINAL_ORDER: u8 = 0x89;
pub const EV_DEVICE_ERROR: u8 = 0x8f;
pub const EV_PUZZLE_SOLVED: u8 = 0x90;
pub const EV_PUZZLE_FAILED: u8 = 0x91;
