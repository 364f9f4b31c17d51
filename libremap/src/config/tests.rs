use super::*;
use crate::rule::ImageRule;
use crate::store::IMAGES_KEY;
use std::collections::HashMap;

type RawOverrides = HashMap<String, ImageRule>;

#[test]
fn test_unmarshal_images_key() {
    let yaml = r#"
images:
  all:
    repository: myreg.io/myorg
  cert-manager:
    tag: v1.14.4
"#;
    let reader = ConfigReader::from_yaml_str(yaml).unwrap();
    let raw: RawOverrides = reader.unmarshal_key(IMAGES_KEY).unwrap().unwrap();

    assert_eq!(raw.len(), 2);
    assert_eq!(raw["all"].repository, "myreg.io/myorg");
    assert_eq!(raw["all"].tag, "");
    assert_eq!(raw["cert-manager"].tag, "v1.14.4");
}

#[test]
fn test_absent_key_is_none() {
    let yaml = "providers: []\n";
    let reader = ConfigReader::from_yaml_str(yaml).unwrap();
    let raw: Option<RawOverrides> = reader.unmarshal_key(IMAGES_KEY).unwrap();
    assert!(raw.is_none());
}

#[test]
fn test_malformed_images_value_fails() {
    let yaml = "images: just-a-string\n";
    let reader = ConfigReader::from_yaml_str(yaml).unwrap();
    let result: Result<Option<RawOverrides>> = reader.unmarshal_key(IMAGES_KEY);
    assert!(matches!(
        result.unwrap_err(),
        RemapError::Config { .. }
    ));
}

#[test]
fn test_invalid_yaml_fails_at_load() {
    let result = ConfigReader::from_yaml_str(": not : valid : yaml :");
    assert!(result.is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overrides.yaml");
    std::fs::write(
        &path,
        "images:\n  all:\n    repository: myreg.io/myorg\n",
    )
    .unwrap();

    let reader = ConfigReader::load(&path).unwrap();
    let raw: RawOverrides = reader.unmarshal_key(IMAGES_KEY).unwrap().unwrap();
    assert_eq!(raw["all"].repository, "myreg.io/myorg");
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigReader::load(&dir.path().join("absent.yaml"));
    assert!(matches!(
        result.unwrap_err(),
        RemapError::Config { .. }
    ));
}
