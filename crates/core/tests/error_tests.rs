// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use portfolio_rebalancer_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("negative current value".into());
        assert_eq!(err.to_string(), "Validation failed: negative current value");
    }

    #[test]
    fn holding_not_found() {
        let err = CoreError::HoldingNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Holding not found: abc-123");
    }

    #[test]
    fn asset_class_not_found() {
        let err = CoreError::AssetClassNotFound("xyz".into());
        assert_eq!(err.to_string(), "Asset class not found: xyz");
    }

    #[test]
    fn duplicate_asset_class() {
        let err = CoreError::DuplicateAssetClass("Equities".into());
        assert_eq!(err.to_string(), "Asset class already exists: Equities");
    }

    #[test]
    fn favorite_not_found() {
        let err = CoreError::FavoriteNotFound("f-1".into());
        assert_eq!(err.to_string(), "Favorite not found: f-1");
    }

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid file format: bad header");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "B3Feed".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "Quote provider error (B3Feed): rate limited");
    }

    #[test]
    fn no_provider() {
        let err = CoreError::NoProvider("PETR4".into());
        assert_eq!(err.to_string(), "No quote provider registered for PETR4");
    }

    #[test]
    fn price_not_available() {
        let err = CoreError::PriceNotAvailable {
            symbol: "VALE3".into(),
        };
        assert_eq!(err.to_string(), "Price not available for VALE3");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.prbl");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref msg) if msg.contains("missing.prbl")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_bincode_error() {
        let bincode_err = bincode::deserialize::<String>(&[0xFF]).unwrap_err();
        let err: CoreError = bincode_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn question_mark_propagates_io_error() {
        fn read_missing() -> Result<Vec<u8>, CoreError> {
            Ok(std::fs::read("/definitely/not/here.prbl")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}

// ── Debug ───────────────────────────────────────────────────────────

#[test]
fn debug_includes_variant_name() {
    let err = CoreError::ValidationError("x".into());
    assert!(format!("{err:?}").contains("ValidationError"));
}
