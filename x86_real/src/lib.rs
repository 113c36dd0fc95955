#![no_std]

pub mod regs;
pub mod structures;

pub use regs::{RFlags, RealModeInt, RealModeRegs};
