//! Environment overrides live in their own test binary so the variables never
//! leak into the file-based configuration tests.

use std::path::PathBuf;

use brand_context::config::AppConfig;

#[test]
fn candidates_list_from_environment() {
    std::env::set_var("APP__DOCUMENT__CANDIDATES", "/tmp/a.txt,/srv/landon/pdf_text.txt");
    std::env::set_var("APP__SERVER__PORT", "8181");

    let config = AppConfig::load(None).unwrap();

    std::env::remove_var("APP__DOCUMENT__CANDIDATES");
    std::env::remove_var("APP__SERVER__PORT");

    assert_eq!(
        config.document.candidates,
        vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/srv/landon/pdf_text.txt")]
    );
    assert_eq!(config.server.port, 8181);
    assert!(config.document.path.is_none());
}
