use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TroopError::catalog("x")
            .to_string()
            .contains("catalog error:")
    );
    assert!(
        TroopError::selection("x")
            .to_string()
            .contains("selection error:")
    );
    assert!(
        TroopError::load("x")
            .to_string()
            .contains("layer load error:")
    );
    assert!(TroopError::export("x").to_string().contains("export error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TroopError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
