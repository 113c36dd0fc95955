use bit_field::BitField;
use bitflags::bitflags;

bitflags! {
    /// Flags for a GDT descriptor. Not all flags are valid for all
    /// descriptor types.
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    pub struct DescriptorFlags: u64 {
        const ACCESSED          = 1 << 40;
        const WRITABLE          = 1 << 41;
        const EXECUTABLE        = 1 << 43;
        const USER_SEGMENT      = 1 << 44;
        const PRESENT           = 1 << 47;
        const GRANULARITY       = 1 << 55;
    }
}

impl DescriptorFlags {
    /// Byte-granular read/write data segment, the access rights every
    /// entry of a copy descriptor table carries.
    pub const DATA: Self = Self::from_bits_truncate(
        Self::USER_SEGMENT.bits()
            | Self::PRESENT.bits()
            | Self::WRITABLE.bits()
            | Self::ACCESSED.bits(),
    );
}

/// Limit covering a full 1 MiB of byte-granular addressing.
pub const LIMIT_1M: u32 = 0xFFFFF;

/// A flat data-segment descriptor over `[base, base + limit]`, packed
/// into the split fields of the 8-byte legacy descriptor format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct FlatDescriptor(u64);

impl FlatDescriptor {
    pub const fn null() -> Self {
        Self(0)
    }

    pub fn data(base: u32, limit: u32) -> Self {
        let mut raw = DescriptorFlags::DATA.bits();
        raw.set_bits(0..16, (limit as u64).get_bits(0..16));
        raw.set_bits(48..52, (limit as u64).get_bits(16..20));
        raw.set_bits(16..40, (base as u64).get_bits(0..24));
        raw.set_bits(56..64, (base as u64).get_bits(24..32));

        Self(raw)
    }

    pub fn base(&self) -> u32 {
        let mut base = 0u64;
        base.set_bits(0..24, self.0.get_bits(16..40));
        base.set_bits(24..32, self.0.get_bits(56..64));

        base as u32
    }

    pub fn limit(&self) -> u32 {
        let mut limit = 0u64;
        limit.set_bits(0..16, self.0.get_bits(0..16));
        limit.set_bits(16..20, self.0.get_bits(48..52));

        limit as u32
    }

    pub fn flags(&self) -> DescriptorFlags {
        DescriptorFlags::from_bits_truncate(self.0)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }
}

/// The six-entry descriptor table taken by the extended-copy BIOS
/// service: the caller fills source and target, the service builds its
/// own code and stack entries in the remaining slots.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct CopyDescriptorTable {
    entries: [FlatDescriptor; 6],
}

const SOURCE: usize = 2;
const TARGET: usize = 3;

impl CopyDescriptorTable {
    pub fn new(source: FlatDescriptor, target: FlatDescriptor) -> Self {
        let mut entries = [FlatDescriptor::null(); 6];
        entries[SOURCE] = source;
        entries[TARGET] = target;

        Self { entries }
    }

    pub fn source(&self) -> FlatDescriptor {
        self.entries[SOURCE]
    }

    pub fn target(&self) -> FlatDescriptor {
        self.entries[TARGET]
    }

    /// Address of the table, in the form the service's table pointer
    /// register takes.
    pub fn addr(&self) -> u32 {
        self as *const Self as usize as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_descriptor_round_trips_base_and_limit() {
        let desc = FlatDescriptor::data(0x0012_3456, LIMIT_1M);
        assert_eq!(desc.base(), 0x0012_3456);
        assert_eq!(desc.limit(), LIMIT_1M);
    }

    #[test]
    fn flat_descriptor_carries_the_high_base_byte() {
        let desc = FlatDescriptor::data(0xFEDC_BA98, 0x1_2345);
        assert_eq!(desc.base(), 0xFEDC_BA98);
        assert_eq!(desc.limit(), 0x1_2345);
    }

    #[test]
    fn flat_descriptor_has_data_access_rights() {
        let flags = FlatDescriptor::data(0, LIMIT_1M).flags();
        assert!(flags.contains(DescriptorFlags::DATA));
        assert!(!flags.contains(DescriptorFlags::EXECUTABLE));
    }

    #[test]
    fn copy_table_places_source_and_target() {
        let src = FlatDescriptor::data(0x2_0000, LIMIT_1M);
        let dst = FlatDescriptor::data(0x9_0000, LIMIT_1M);
        let table = CopyDescriptorTable::new(src, dst);

        assert_eq!(table.source(), src);
        assert_eq!(table.target(), dst);
        assert_eq!(table.entries[0], FlatDescriptor::null());
        assert_eq!(table.entries[1], FlatDescriptor::null());
        assert_eq!(table.entries[4], FlatDescriptor::null());
        assert_eq!(table.entries[5], FlatDescriptor::null());
    }
}
