use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        UnwrapError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        UnwrapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = UnwrapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
