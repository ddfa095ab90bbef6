#![cfg_attr(not(feature = "std"), no_std)]

mod bus;
pub use bus::*;

mod hwid;
pub use hwid::*;

mod node;
pub use node::*;

pub mod protocol;
