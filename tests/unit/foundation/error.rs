use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChipflowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ChipflowError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ChipflowError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        ChipflowError::contact("x")
            .to_string()
            .contains("contact error:")
    );
    assert!(
        ChipflowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChipflowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: ChipflowError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ChipflowError::Serde(_)));
}
