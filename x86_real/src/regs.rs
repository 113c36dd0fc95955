use bit_field::BitField;
use bitflags::bitflags;

bitflags! {
    /// FLAGS image passed to and returned from a real-mode service.
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    pub struct RFlags: u32 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 6;
        const INTERRUPT = 1 << 9;
    }
}

/// Register file handed to a legacy software-interrupt call, laid out
/// the way real-mode services expect their inputs and outputs.
#[derive(Debug, Clone, Copy)]
pub struct RealModeRegs {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
    pub esi: u32,
    pub edi: u32,
    pub es: u16,
    pub ds: u16,
    pub flags: RFlags,
}

impl Default for RealModeRegs {
    fn default() -> Self {
        Self {
            eax: 0,
            ebx: 0,
            ecx: 0,
            edx: 0,
            esi: 0,
            edi: 0,
            es: 0,
            ds: 0,
            flags: RFlags::empty(),
        }
    }
}

impl RealModeRegs {
    pub fn ah(&self) -> u8 {
        self.eax.get_bits(8..16) as u8
    }

    pub fn set_ah(&mut self, val: u8) {
        self.eax.set_bits(8..16, val as u32);
    }

    pub fn al(&self) -> u8 {
        self.eax.get_bits(0..8) as u8
    }

    pub fn set_al(&mut self, val: u8) {
        self.eax.set_bits(0..8, val as u32);
    }
}

/// Capability for issuing a real-mode software interrupt.
///
/// The implementation owns the mode switch and the 16-bit trampoline; on
/// return `regs` holds the service's outputs, including the flags image.
pub trait RealModeInt {
    fn call(&mut self, vector: u8, regs: &mut RealModeRegs);
}
