#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use dotprom_core::error::DotpromError;
use dotprom_exporter::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
exporter:
  scrap_port: 9100 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::BadConfig(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.scrape_port, 8000);
    assert_eq!(cfg.exporter.namespace, "dotprom");

    // No mapping section means the stock table.
    let table = cfg.mapping_table().unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.basename("response.status.200"), "response.status");
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::UnsupportedVersion));
}

#[test]
fn rejects_zero_scrape_port() {
    let bad = r#"
version: 1
exporter:
  scrape_port: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::BadConfig(_)));
}

#[test]
fn rejects_invalid_namespace() {
    let bad = r#"
version: 1
exporter:
  namespace: "9thumbor"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::BadConfig(_)));
}

#[test]
fn rejects_empty_mapping() {
    let bad = r#"
version: 1
mapping: {}
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::BadConfig(_)));
}

#[test]
fn rejects_mapping_entry_without_labels() {
    let bad = r#"
version: 1
mapping:
  response.status: []
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, DotpromError::BadConfig(_)));
}

#[test]
fn custom_mapping_replaces_stock_table() {
    let ok = r#"
version: 1
exporter:
  scrape_port: 9100
  namespace: "imgproxy"
mapping:
  upstream.fetch: [statuscode, host]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let table = cfg.mapping_table().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.basename("upstream.fetch.502.cdn.example.org"), "upstream.fetch");
    assert_eq!(table.basename("response.status.200"), "response.status.200");
}
