//! # Configuration Tests

use pretty_assertions::assert_eq;

use rtlbridge_core::config::{SignalDecl, SignalTable};
use rtlbridge_core::{Access, SessionConfig, SignalAddr, SimError};

#[test]
fn test_session_config_defaults() {
    let config = SessionConfig::default();
    assert!(!config.trace_phases);
    assert!(!config.trace_changes);
    assert!(config.eval_before_edge);
}

#[test]
fn test_session_config_partial_json() {
    let config = SessionConfig::from_json(r#"{ "eval_before_edge": false }"#).unwrap();
    assert_eq!(
        config,
        SessionConfig {
            eval_before_edge: false,
            ..SessionConfig::default()
        }
    );
    assert_eq!(SessionConfig::from_json("{}").unwrap(), SessionConfig::default());
}

#[test]
fn test_session_config_malformed() {
    let err = SessionConfig::from_json(r#"{ "trace_phases": "yes" }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_signal_table_decoding() {
    let table = SignalTable::from_json(
        r#"{
            "signals": [
                { "path": "top.clk", "offset": 0, "bit_width": 1, "writable": true },
                { "path": "top.acc", "offset": 1, "bit_width": 12, "signed": true, "type_width": [1] }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(
        table.signals,
        vec![
            SignalDecl {
                path: "top.clk".to_owned(),
                offset: SignalAddr::new(0),
                bit_width: 1,
                signed: false,
                writable: true,
                type_width: vec![],
            },
            SignalDecl {
                path: "top.acc".to_owned(),
                offset: SignalAddr::new(1),
                bit_width: 12,
                signed: true,
                writable: false,
                type_width: vec![1],
            },
        ]
    );
    assert_eq!(table.signals[0].access(), Access::ReadWrite);
    assert_eq!(table.signals[1].access(), Access::ReadOnly);
}

#[test]
fn test_signal_table_requires_width() {
    let err = SignalTable::from_json(r#"{ "signals": [ { "path": "x", "offset": 0 } ] }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}
