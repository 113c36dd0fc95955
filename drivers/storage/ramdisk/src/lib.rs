//! Driver emulating a floppy drive via a flash image copied into high
//! memory at boot.

#![no_std]

pub mod int15;

use core::fmt;

use diskstd::{
    copy::{BlockCopier, CopyError, PhysRange},
    drive::{Drive, DriveKind, DriveLabel, DriveRegistry},
    flash::FlashStore,
    floppy::FloppyType,
    memmap::{HighMemAllocator, MemoryMap, RegionKind},
    op::{Command, DiskOp, DiskStatus},
    PAGE_SIZE, SECTOR_SIZE,
};

/// Flash files holding floppy images live under this name prefix.
pub const FLOPPY_IMAGE_PREFIX: &str = "floppyimg/";

/// Feature switches the platform resolves before constructing the
/// driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamdiskConfig {
    /// Flash-resident boot images are available on this platform.
    pub flash_images: bool,
    /// Floppy emulation is enabled.
    pub floppy_emulation: bool,
}

impl RamdiskConfig {
    fn active(&self) -> bool {
        self.flash_images && self.floppy_emulation
    }
}

/// The ramdisk driver. Holds its configuration and the block-copy
/// backend all transfers go through.
#[derive(Debug)]
pub struct Ramdisk<C> {
    config: RamdiskConfig,
    copier: C,
}

impl<C: BlockCopier> Ramdisk<C> {
    pub fn new(config: RamdiskConfig, copier: C) -> Self {
        Self { config, copier }
    }

    /// Locates a floppy image in flash, maps it into reserved high
    /// memory and registers it as a drive.
    ///
    /// Ramdisk support is an optional convenience, so every failure is a
    /// logged no-op rather than a boot error: at most one drive comes
    /// out, never a partial one.
    pub fn setup(
        &mut self,
        flash: &impl FlashStore,
        highmem: &mut impl HighMemAllocator,
        memmap: &mut impl MemoryMap,
        drives: &mut impl DriveRegistry,
    ) {
        if !self.config.active() {
            return;
        }

        let _ = self.try_setup(flash, highmem, memmap, drives);
    }

    fn try_setup(
        &mut self,
        flash: &impl FlashStore,
        highmem: &mut impl HighMemAllocator,
        memmap: &mut impl MemoryMap,
        drives: &mut impl DriveRegistry,
    ) -> Option<()> {
        let file = flash.find_prefix(FLOPPY_IMAGE_PREFIX)?;
        let size = file.size();
        log::debug!("flash floppy image {} ({} bytes)", file.name, size);

        let Some(floppy_type) = FloppyType::from_size(size) else {
            log::debug!("image size {} matches no floppy geometry", size);
            return None;
        };

        let Some(base) = highmem.memalign_high(PAGE_SIZE, size) else {
            log::debug!("high memory allocation of {} bytes failed", size);
            return None;
        };
        memmap.add_region(base as u64, size as u64, RegionKind::Reserved);

        let region = unsafe { PhysRange::new(base, size) };
        self.copier
            .copy(PhysRange::of_slice(file.data), region)
            .ok()?;

        log::info!("registering {} as ramdisk at {:#x}", file.name, base);
        let drive = drives.add_floppy(Drive {
            base,
            kind: DriveKind::Ramdisk,
            floppy_type,
            label: DriveLabel::default(),
        })?;
        drive.label = DriveLabel::truncated(file.name);

        Some(())
    }

    /// Services one request against a ramdisk drive.
    pub fn process_op(&mut self, op: &mut DiskOp) -> DiskStatus {
        if !self.config.active() {
            return DiskStatus::NotHandled;
        }

        match op.command {
            Command::Read => self.copy_op(op, false),
            Command::Write => self.copy_op(op, true),
            Command::Verify | Command::Format | Command::Reset => DiskStatus::Success,
            Command::Other(_) => {
                op.count = 0;
                DiskStatus::ParamError
            }
        }
    }

    fn copy_op(&mut self, op: &mut DiskOp, is_write: bool) -> DiskStatus {
        let offset = op.drive.base + op.lba as usize * SECTOR_SIZE;
        let len = op.count as usize * SECTOR_SIZE;

        let image = unsafe { PhysRange::new(offset, len) };
        let buf = PhysRange::of_mut_slice(op.buf);

        let (src, dst) = if is_write { (buf, image) } else { (image, buf) };
        match self.copier.copy(src, dst) {
            Ok(()) => DiskStatus::Success,
            Err(CopyError::Fault) => DiskStatus::BadTrack,
        }
    }
}

/// Renders a ramdisk drive's user-visible description, its source image
/// name.
pub fn describe(drive: &Drive, out: &mut dyn fmt::Write) -> fmt::Result {
    write!(out, "{}", drive.label)
}
