use crate::drive::Drive;

/// Disk command selector carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Read,
    Write,
    Verify,
    Format,
    Reset,
    /// Anything this driver does not recognize, by raw command code.
    Other(u8),
}

/// Outcome of one disk operation, from the fixed platform status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DiskStatus {
    Success,
    /// Request was malformed for this driver; no data moved.
    ParamError,
    /// The underlying transfer faulted.
    BadTrack,
    /// This driver does not service the request; try the next one.
    NotHandled,
}

/// One synchronous I/O request against a registered drive.
///
/// Built by the disk-interrupt layer per call and consumed immediately;
/// never retained by a driver.
#[derive(Debug)]
pub struct DiskOp<'a> {
    pub drive: &'a Drive,
    pub command: Command,
    /// First logical sector of the transfer.
    pub lba: u32,
    /// Sectors to move. Zeroed by the dispatcher when it rejects the
    /// command, so callers observe that nothing transferred.
    pub count: u16,
    pub buf: &'a mut [u8],
}
