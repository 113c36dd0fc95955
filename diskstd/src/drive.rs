use core::fmt;

use crate::floppy::FloppyType;

/// Usable width of a drive's display label, matching the 16-byte model
/// field of the platform drive table (15 characters plus terminator).
pub const LABEL_CAPACITY: usize = 15;

/// What kind of hardware backs a drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveKind {
    Floppy,
    Ramdisk,
}

/// Bounded display label for a registered drive.
///
/// Construction always truncates to [LABEL_CAPACITY], so the label can
/// never overrun the fixed-width field it models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveLabel(heapless::String<LABEL_CAPACITY>);

impl DriveLabel {
    /// Builds a label from `name`, keeping as many leading characters as
    /// fit. Never splits a multi-byte character.
    pub fn truncated(name: &str) -> Self {
        let mut label = heapless::String::new();
        for c in name.chars() {
            if label.push(c).is_err() {
                break;
            }
        }

        Self(label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriveLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One registered virtual disk, as stored in the platform drive table.
#[derive(Debug)]
pub struct Drive {
    /// Physical base address of the backing storage.
    pub base: usize,
    pub kind: DriveKind,
    pub floppy_type: FloppyType,
    pub label: DriveLabel,
}

impl Drive {
    pub fn sectors(&self) -> u32 {
        (self.floppy_type.capacity() / crate::SECTOR_SIZE) as u32
    }
}

/// Platform drive table. Registration hands back the freshly added slot,
/// or `None` once the table is exhausted.
pub trait DriveRegistry {
    fn add_floppy(&mut self, drive: Drive) -> Option<&mut Drive>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_truncates_long_names() {
        // 40 characters in, first 15 out
        let label = DriveLabel::truncated("floppyimg/freedos-boot-disk-1440kB.image");
        assert_eq!(label.as_str(), "floppyimg/freed");
    }

    #[test]
    fn label_keeps_short_and_exact_names() {
        assert_eq!(DriveLabel::truncated("boot.img").as_str(), "boot.img");
        assert_eq!(
            DriveLabel::truncated("exactly15chars!").as_str(),
            "exactly15chars!"
        );
        assert_eq!(DriveLabel::truncated("").as_str(), "");
    }

    #[test]
    fn label_never_splits_a_multibyte_character() {
        // 14 ASCII bytes followed by a two-byte character: the full
        // character no longer fits and is dropped whole.
        let label = DriveLabel::truncated("0123456789abcdé");
        assert_eq!(label.as_str(), "0123456789abcd");
    }

    #[test]
    fn sector_count_follows_geometry() {
        let drive = Drive {
            base: 0x10_0000,
            kind: DriveKind::Ramdisk,
            floppy_type: FloppyType::F1_44m,
            label: DriveLabel::default(),
        };
        assert_eq!(drive.sectors(), 2880);
    }
}
