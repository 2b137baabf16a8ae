use super::*;

#[test]
fn pgwire_fields_mapping() {
    let (code, sev, msg) = CatalogError::table_not_found("widgets").pgwire_fields();
    assert_eq!(code, "42P01");
    assert_eq!(sev, "ERROR");
    assert_eq!(msg, "table \"widgets\" does not exist");

    let (code, _, _) = CatalogError::database_not_found("nope").pgwire_fields();
    assert_eq!(code, "3D000");

    let (code, sev, _) = CatalogError::Cancelled.pgwire_fields();
    assert_eq!(code, "57014");
    assert_eq!(sev, "ERROR");

    let (code, sev, _) = CatalogError::config("bad", "x").pgwire_fields();
    assert_eq!(code, "F0000");
    assert_eq!(sev, "FATAL");

    let (code, _, msg) = CatalogError::collaborator("storage", "disk gone").pgwire_fields();
    assert_eq!(code, "XX000");
    assert_eq!(msg, "disk gone");
}

#[test]
fn display_includes_code_and_message() {
    let e = CatalogError::not_found("table_not_found", "missing");
    assert_eq!(e.to_string(), "table_not_found: missing");
    assert_eq!(e.code_str(), "table_not_found");
    assert!(e.is_not_found());
    assert!(!CatalogError::Cancelled.is_not_found());
}

#[test]
fn json_errors_map_to_config() {
    let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
    let e: CatalogError = err.into();
    assert_eq!(e.code_str(), "invalid_json");
}

#[test]
fn serializes_with_type_tag() {
    let e = CatalogError::internal("frame_build", "boom");
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["type"], "internal");
    assert_eq!(v["code"], "frame_build");
}
