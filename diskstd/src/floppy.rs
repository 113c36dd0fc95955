use crate::SECTOR_SIZE;

/// Cylinder/head/sector shape of one floppy format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chs {
    pub cylinders: u16,
    pub heads: u8,
    pub sectors_per_track: u8,
}

impl Chs {
    pub const fn capacity(&self) -> usize {
        self.cylinders as usize
            * self.heads as usize
            * self.sectors_per_track as usize
            * SECTOR_SIZE
    }
}

/// Standard floppy formats, by capacity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloppyType {
    F160k,
    F180k,
    F320k,
    F360k,
    F720k,
    F1_2m,
    F1_44m,
    F2_88m,
}

impl FloppyType {
    pub const ALL: [FloppyType; 8] = [
        FloppyType::F160k,
        FloppyType::F180k,
        FloppyType::F320k,
        FloppyType::F360k,
        FloppyType::F720k,
        FloppyType::F1_2m,
        FloppyType::F1_44m,
        FloppyType::F2_88m,
    ];

    pub const fn chs(self) -> Chs {
        let (cylinders, heads, sectors_per_track) = match self {
            FloppyType::F160k => (40, 1, 8),
            FloppyType::F180k => (40, 1, 9),
            FloppyType::F320k => (40, 2, 8),
            FloppyType::F360k => (40, 2, 9),
            FloppyType::F720k => (80, 2, 9),
            FloppyType::F1_2m => (80, 2, 15),
            FloppyType::F1_44m => (80, 2, 18),
            FloppyType::F2_88m => (80, 2, 36),
        };

        Chs {
            cylinders,
            heads,
            sectors_per_track,
        }
    }

    pub const fn capacity(self) -> usize {
        self.chs().capacity()
    }

    /// Maps an exact byte size to the floppy format of that capacity.
    /// Sizes that match no standard format return `None`.
    pub fn from_size(size: usize) -> Option<FloppyType> {
        Self::ALL.iter().copied().find(|t| t.capacity() == size)
    }
}
