/// A file embedded in the firmware's flash image at build time.
#[derive(Debug, Clone, Copy)]
pub struct FlashFile<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
}

impl FlashFile<'_> {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Read-only view of the flash file store.
pub trait FlashStore {
    /// Returns the first file whose name starts with `prefix`.
    fn find_prefix(&self, prefix: &str) -> Option<FlashFile<'_>>;
}
