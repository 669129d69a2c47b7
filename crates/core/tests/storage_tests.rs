// ═══════════════════════════════════════════════════════════════════
// Storage Tests — encrypted NWTK file format, round-trips, tamper
// detection
// ═══════════════════════════════════════════════════════════════════

use networth_tracker_core::errors::CoreError;
use networth_tracker_core::models::asset::{Asset, AssetType};
use networth_tracker_core::models::ledger::Ledger;
use networth_tracker_core::storage::format;
use networth_tracker_core::storage::manager::StorageManager;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    let mut apple = Asset::new(1, "Apple Inc.", "Alice", AssetType::Stock);
    apple.ticker = Some("AAPL".into());
    apple.quantity = 10.0;
    apple.buying_value = 150.0;
    apple.buying_amount = 1500.0;
    apple.current_value = 185.0;
    apple.current_amount = 1850.0;
    ledger.assets.push(apple);
    ledger.next_asset_id = 2;
    ledger
}

// ═══════════════════════════════════════════════════════════════════
// Byte round-trips
// ═══════════════════════════════════════════════════════════════════

mod bytes_roundtrip {
    use super::*;

    #[test]
    fn save_and_load_preserves_ledger() {
        let ledger = sample_ledger();
        let bytes = StorageManager::save_to_bytes(&ledger, "secret").unwrap();
        let loaded = StorageManager::load_from_bytes(&bytes, "secret").unwrap();

        assert_eq!(loaded.assets.len(), 1);
        assert_eq!(loaded.assets[0].name, "Apple Inc.");
        assert_eq!(loaded.assets[0].current_amount, 1850.0);
        assert_eq!(loaded.next_asset_id, 2);
        assert_eq!(loaded.hypotheses.len(), 5);
    }

    #[test]
    fn file_starts_with_magic_bytes() {
        let bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        assert_eq!(&bytes[0..4], b"NWTK");
    }

    #[test]
    fn two_saves_differ_due_to_fresh_salt_and_nonce() {
        let ledger = sample_ledger();
        let a = StorageManager::save_to_bytes(&ledger, "secret").unwrap();
        let b = StorageManager::save_to_bytes(&ledger, "secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password_is_decryption_error() {
        let bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        let err = StorageManager::load_from_bytes(&bytes, "wrong").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Format validation
// ═══════════════════════════════════════════════════════════════════

mod format_validation {
    use super::*;

    #[test]
    fn bad_magic_is_invalid_format() {
        let mut bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        bytes[0..4].copy_from_slice(b"JUNK");
        let err = StorageManager::load_from_bytes(&bytes, "secret").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn truncated_file_is_invalid_format() {
        let bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        let err = StorageManager::load_from_bytes(&bytes[..20], "secret").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn truncated_ciphertext_is_invalid_format() {
        let bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        let err =
            StorageManager::load_from_bytes(&bytes[..bytes.len() - 10], "secret").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn future_version_is_unsupported() {
        let mut bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        // Version field sits right after the 4 magic bytes, LE u16.
        bytes[4..6].copy_from_slice(&99u16.to_le_bytes());
        let err = StorageManager::load_from_bytes(&bytes, "secret").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(99)));
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let mut bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = StorageManager::load_from_bytes(&bytes, "secret").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn huge_ciphertext_length_is_invalid_format() {
        let mut bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        // The ciphertext length field is the last 8 bytes of the header.
        // A crafted maximum value must be rejected, not overflow the
        // offset arithmetic.
        let len_field = format::MIN_HEADER_SIZE - 8..format::MIN_HEADER_SIZE;
        bytes[len_field].copy_from_slice(&u64::MAX.to_le_bytes());
        let err = StorageManager::load_from_bytes(&bytes, "secret").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn absurd_kdf_params_are_rejected() {
        let mut bytes = StorageManager::save_to_bytes(&sample_ledger(), "secret").unwrap();
        // memory_cost field follows magic + version, LE u32. A crafted
        // multi-terabyte memory cost must be rejected before key derivation.
        bytes[6..10].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = StorageManager::load_from_bytes(&bytes, "secret").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn min_header_size_matches_layout() {
        // magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + len(8)
        assert_eq!(format::MIN_HEADER_SIZE, 54);
    }
}

// ═══════════════════════════════════════════════════════════════════
// File round-trips (native only)
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod file_roundtrip {
    use super::*;

    #[test]
    fn save_and_load_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.nwtk");
        let path_str = path.to_str().unwrap();

        StorageManager::save_to_file(&sample_ledger(), path_str, "secret").unwrap();
        let loaded = StorageManager::load_from_file(path_str, "secret").unwrap();

        assert_eq!(loaded.assets[0].ticker.as_deref(), Some("AAPL"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StorageManager::load_from_file("/nonexistent/portfolio.nwtk", "secret")
            .unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
