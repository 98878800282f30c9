//! Compile tests for the `Reclaim` derive's public surface.

#[test]
fn derive_pass_cases() {
    let cases = trybuild::TestCases::new();
    cases.pass("tests/ui/pass/*.rs");
}
