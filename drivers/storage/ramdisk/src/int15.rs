//! Legacy block-copy backend routed through the BIOS system-services
//! interrupt, function AH=0x87 (extended memory block move).

use diskstd::copy::{BlockCopier, CopyError, PhysRange};
use x86_real::{
    structures::{CopyDescriptorTable, FlatDescriptor, LIMIT_1M},
    RFlags, RealModeInt, RealModeRegs,
};

/// Interrupt vector of the system-services BIOS entry point.
pub const SYSTEM_SERVICES: u8 = 0x15;

/// AH subfunction selecting the extended-copy service.
pub const EXTENDED_COPY: u8 = 0x87;

/// Block copier that hands transfers to the real-mode extended-copy
/// service, two flat descriptors at a time.
#[derive(Debug)]
pub struct Int15Copier<I> {
    int: I,
    /// Segment the descriptor table pointer is taken relative to; the
    /// table lives on the caller's stack.
    stack_seg: u16,
}

impl<I: RealModeInt> Int15Copier<I> {
    pub fn new(int: I, stack_seg: u16) -> Self {
        Self { int, stack_seg }
    }
}

fn build_table(src: PhysRange, dst: PhysRange) -> CopyDescriptorTable {
    CopyDescriptorTable::new(
        FlatDescriptor::data(src.base() as u32, LIMIT_1M),
        FlatDescriptor::data(dst.base() as u32, LIMIT_1M),
    )
}

impl<I: RealModeInt> BlockCopier for Int15Copier<I> {
    fn copy(&mut self, src: PhysRange, dst: PhysRange) -> Result<(), CopyError> {
        let table = build_table(src, dst);

        let mut regs = RealModeRegs::default();
        regs.flags = RFlags::CARRY | RFlags::INTERRUPT;
        regs.set_ah(EXTENDED_COPY);
        regs.es = self.stack_seg;
        regs.esi = table.addr();
        // transfer length, in 16-bit words
        regs.ecx = (src.len() / 2) as u32;
        self.int.call(SYSTEM_SERVICES, &mut regs);

        if regs.flags.contains(RFlags::CARRY) {
            return Err(CopyError::Fault);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the call and scripts the carry flag the service leaves
    /// behind.
    struct ScriptedInt {
        fault: bool,
        seen: Option<(u8, RealModeRegs)>,
    }

    impl ScriptedInt {
        fn new(fault: bool) -> Self {
            Self { fault, seen: None }
        }
    }

    impl RealModeInt for ScriptedInt {
        fn call(&mut self, vector: u8, regs: &mut RealModeRegs) {
            self.seen = Some((vector, *regs));
            if self.fault {
                regs.flags.insert(RFlags::CARRY);
            } else {
                regs.flags.remove(RFlags::CARRY);
            }
        }
    }

    fn ranges() -> (PhysRange, PhysRange) {
        unsafe { (PhysRange::new(0x2_0000, 1024), PhysRange::new(0x9_0000, 1024)) }
    }

    #[test]
    fn copy_issues_the_extended_copy_service() {
        let (src, dst) = ranges();
        let mut copier = Int15Copier::new(ScriptedInt::new(false), 0xE000);

        copier.copy(src, dst).unwrap();

        let (vector, regs) = copier.int.seen.unwrap();
        assert_eq!(vector, SYSTEM_SERVICES);
        assert_eq!(regs.ah(), EXTENDED_COPY);
        assert_eq!(regs.es, 0xE000);
        // two sectors, as 16-bit words
        assert_eq!(regs.ecx, 512);
        // the call goes out with CF and IF already set
        assert!(regs.flags.contains(RFlags::CARRY | RFlags::INTERRUPT));
    }

    #[test]
    fn carry_out_is_a_fault() {
        let (src, dst) = ranges();
        let mut copier = Int15Copier::new(ScriptedInt::new(true), 0);

        assert_eq!(copier.copy(src, dst), Err(CopyError::Fault));
    }

    #[test]
    fn carry_clear_is_success() {
        let (src, dst) = ranges();
        let mut copier = Int15Copier::new(ScriptedInt::new(false), 0);

        assert_eq!(copier.copy(src, dst), Ok(()));
    }

    #[test]
    fn table_describes_both_ranges_with_megabyte_limits() {
        let (src, dst) = ranges();
        let table = build_table(src, dst);

        assert_eq!(table.source().base(), 0x2_0000);
        assert_eq!(table.target().base(), 0x9_0000);
        assert_eq!(table.source().limit(), LIMIT_1M);
        assert_eq!(table.target().limit(), LIMIT_1M);
    }
}
