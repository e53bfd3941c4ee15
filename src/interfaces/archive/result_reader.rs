use crate::error::{Result, WorkflowError};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Pulls the result image out of the service's zip envelope.
///
/// Contract: the FIRST entry in enumeration order is the result. Extra
/// entries are accepted and ignored, deliberately; picking "the largest"
/// or "the only PNG" instead would be behavior drift. The entry's content
/// is not inspected beyond being bytes.
pub fn first_entry(archive_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| WorkflowError::Unknown(format!("unreadable archive: {e}")))?;
    if archive.is_empty() {
        return Err(WorkflowError::ArchiveEmpty);
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|e| WorkflowError::Unknown(format!("unreadable archive entry: {e}")))?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    tracing::debug!(name = entry.name(), len = bytes.len(), "extracted result entry");
    Ok(bytes)
}
