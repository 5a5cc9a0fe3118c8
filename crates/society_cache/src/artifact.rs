//! On-disk encoding of cache slots.
//!
//! A slot file is a 4-byte little-endian header length, a bincode-encoded
//! [`SlotHeader`], and the bincode-encoded payload. The header carries magic
//! bytes, a format version, and a checksum of the payload so that truncated or
//! foreign files are reported instead of being decoded as garbage.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use society_common::ContentHash;

use crate::error::CacheError;

/// Magic bytes identifying a society cache slot.
const SLOT_MAGIC: [u8; 4] = *b"SOCY";

/// Current slot format version. Increment on breaking changes to
/// the header or payload format.
const SLOT_FORMAT_VERSION: u32 = 1;

/// Header prepended to every slot for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotHeader {
    /// Magic bytes: must be `b"SOCY"`.
    pub magic: [u8; 4],

    /// Slot format version.
    pub format_version: u32,

    /// Content hash of the payload bytes.
    pub checksum: ContentHash,
}

/// Serializes `value` into a complete slot image (header + payload).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CacheError> {
    let payload = bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header = SlotHeader {
        magic: SLOT_MAGIC,
        format_version: SLOT_FORMAT_VERSION,
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Validates a slot image read from `path` and decodes its payload.
pub fn decode<T: DeserializeOwned>(path: &Path, raw: &[u8]) -> Result<T, CacheError> {
    let invalid = |reason: &str| CacheError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if raw.len() < 4 {
        return Err(invalid("file shorter than header length prefix"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[..4]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    if raw.len() < 4 + header_len {
        return Err(invalid("header truncated"));
    }

    let (header, _): (SlotHeader, usize) =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .map_err(|e| invalid(&e.to_string()))?;

    if header.magic != SLOT_MAGIC {
        return Err(invalid("bad magic bytes"));
    }
    if header.format_version != SLOT_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: SLOT_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let actual = ContentHash::from_bytes(payload);
    if actual != header.checksum {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }

    let (value, _): (T, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard()).map_err(|e| {
            CacheError::Serialization {
                reason: format!("{}: {e}", path.display()),
            }
        })?;
    Ok(value)
}

/// Writes `bytes` to `path` so that readers see either nothing or the whole file.
///
/// The data goes to a sibling temporary file first and is then renamed over
/// `path`. The parent directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let tmp = temp_sibling(path);
    let result = std::fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(CacheError::io(path, e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".tmp{}", std::process::id()));
    path.with_file_name(name)
}
