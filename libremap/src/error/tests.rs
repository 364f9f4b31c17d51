use super::*;

#[test]
fn test_config_error_display() {
    let err = RemapError::config("override configuration is malformed");
    assert_eq!(
        err.to_string(),
        "Configuration error: override configuration is malformed"
    );
}

#[test]
fn test_config_error_preserves_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
    let err = RemapError::config_with_source("failed to read overrides", io_err);

    let source = std::error::Error::source(&err);
    assert!(source.is_some());
    assert_eq!(source.unwrap().to_string(), "bad bytes");
}

#[test]
fn test_invalid_reference_display() {
    let err = RemapError::invalid_reference("invalid tag 'Latest!'");
    assert_eq!(
        err.to_string(),
        "Invalid image reference: invalid tag 'Latest!'"
    );
}

#[test]
fn test_invalid_reference_has_no_source() {
    let err = RemapError::invalid_reference("image reference is empty");
    assert!(std::error::Error::source(&err).is_none());
}
