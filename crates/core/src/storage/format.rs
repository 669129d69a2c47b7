use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

/// Magic bytes identifying an NWTK (net-worth tracker) ledger file.
pub const MAGIC: &[u8; 4] = b"NWTK";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// Fixed header size in bytes:
/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + ciphertext_len(8)
pub const MIN_HEADER_SIZE: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Parsed header of an encrypted .nwtk file.
#[derive(Debug)]
pub struct FileHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext_len: u64,
}

/// Assemble a complete encrypted file.
///
/// Layout, all integers little-endian:
/// ```text
/// [NWTK: 4B] [version: 2B] [memory_cost: 4B] [time_cost: 4B]
/// [parallelism: 4B] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B]
/// [ciphertext: variable]
/// ```
pub fn write_file(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MIN_HEADER_SIZE + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    for cost in [
        kdf_params.memory_cost,
        kdf_params.time_cost,
        kdf_params.parallelism,
    ] {
        buf.extend_from_slice(&cost.to_le_bytes());
    }
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);
    buf
}

/// Parse the header from raw file bytes.
/// Returns the header and the ciphertext slice borrowed from `data`.
pub fn read_file(data: &[u8]) -> Result<(FileHeader, &[u8]), CoreError> {
    if data.len() < MIN_HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid NWTK file".into(),
        ));
    }
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not an NWTK file".into(),
        ));
    }

    let mut reader = Reader { data, offset: 4 };

    let version = u16::from_le_bytes(reader.take::<2>());
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let memory_cost = u32::from_le_bytes(reader.take::<4>());
    let time_cost = u32::from_le_bytes(reader.take::<4>());
    let parallelism = u32::from_le_bytes(reader.take::<4>());

    // Bound KDF params before deriving a key, so a crafted file can't make
    // us allocate terabytes. memory_cost is in KiB: 8 KiB (Argon2 minimum)
    // up to 1 GiB; time_cost 1..=20; parallelism 1..=16.
    if !(8..=1_048_576).contains(&memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of safe range: {memory_cost} KiB (expected 8..1048576)"
        )));
    }
    if !(1..=20).contains(&time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of safe range: {time_cost} (expected 1..20)"
        )));
    }
    if !(1..=16).contains(&parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of safe range: {parallelism} (expected 1..16)"
        )));
    }

    let salt = reader.take::<SALT_LEN>();
    let nonce = reader.take::<NONCE_LEN>();
    let ciphertext_len = u64::from_le_bytes(reader.take::<8>());

    let body_start = reader.offset;
    // Compare in u64 before casting: the length field comes straight from
    // the file, and a huge value must not overflow the offset arithmetic.
    let remaining = (data.len() - body_start) as u64;
    if ciphertext_len > remaining {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {ciphertext_len} bytes of ciphertext, got {remaining}"
        )));
    }
    let body_end = body_start + ciphertext_len as usize;

    let header = FileHeader {
        version,
        kdf_params: KdfParams {
            memory_cost,
            time_cost,
            parallelism,
        },
        salt,
        nonce,
        ciphertext_len,
    };

    Ok((header, &data[body_start..body_end]))
}

/// Cursor over the fixed-size header fields. Bounds are guaranteed by the
/// `MIN_HEADER_SIZE` check in `read_file`.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        out
    }
}
