//! # Namespace Tests

use pretty_assertions::assert_eq;

use rtlbridge_core::common::ConstructionError;
use rtlbridge_core::namespace::{SignalNamespace, split_path};
use rtlbridge_core::{Access, Session, SessionConfig, SignalAddr, SignalId, SignalMemory, SimError};

use crate::common::models::XorModel;

/// Ids can only be minted by a session, so borrow a few from one.
fn ids(n: usize) -> Vec<SignalId> {
    let mut memory = SignalMemory::new(n);
    let model = XorModel::allocate(&mut memory);
    let mut sim = Session::new(model, memory, SessionConfig::default());
    (0..n)
        .map(|i| {
            sim.register_signal(&format!("s{i}"), SignalAddr::new(i), 8, false, Access::ReadOnly)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_scopes_are_reused() {
    let id = ids(2);
    let mut ns = SignalNamespace::new();
    ns.register(&["a", "b", "c"], id[0], &[]).unwrap();
    ns.register(&["a", "b", "d"], id[1], &[1]).unwrap();

    assert_eq!(ns.len(), 2);
    assert_eq!(ns.lookup(&["a", "b", "c"]), Some(id[0]));
    assert_eq!(ns.lookup_dotted("a.b.d"), Some(id[1]));
    assert!(ns.is_scope("a"));
    assert!(ns.is_scope("a.b"));
    assert!(!ns.is_scope("a.b.c"));
    assert_eq!(ns.lookup(&["a", "b"]), None);
    assert_eq!(ns.lookup(&["a", "b", "c", "x"]), None);
    assert_eq!(ns.lookup(&[]), None);
}

#[test]
fn test_leaf_then_prefix_conflicts() {
    let id = ids(3);
    let mut ns = SignalNamespace::new();
    ns.register_dotted("a.b", id[0], &[]).unwrap();

    let err = ns.register_dotted("a.b.c", id[1], &[]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Construction(ConstructionError::PathConflict { existing: "signal", .. })
    ));
    assert_eq!(ns.len(), 1);
    assert!(!ns.is_scope("a.b"));

    ns.register_dotted("x.y.z", id[2], &[]).unwrap();
    let err = ns.register_dotted("x.y", id[1], &[]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Construction(ConstructionError::PathConflict { existing: "scope", .. })
    ));
}

#[test]
fn test_conflict_reports_joined_path() {
    let id = ids(3);
    let mut ns = SignalNamespace::new();
    ns.register_dotted("top.core.pc", id[0], &[]).unwrap();

    let err = ns.register(&["top", "core", "pc", "lo"], id[1], &[]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Construction(ConstructionError::PathConflict { ref path, existing: "signal" })
            if path == "top.core.pc"
    ));

    let err = ns.register(&["top", "core"], id[2], &[]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Construction(ConstructionError::PathConflict { ref path, existing: "scope" })
            if path == "top.core"
    ));
}

#[test]
fn test_rebinding_a_leaf_conflicts() {
    let id = ids(2);
    let mut ns = SignalNamespace::new();
    ns.register_dotted("top.q", id[0], &[]).unwrap();
    assert!(ns.register_dotted("top.q", id[1], &[]).is_err());
    assert_eq!(ns.lookup_dotted("top.q"), Some(id[0]));
}

#[test]
fn test_arrays_rejected() {
    let id = ids(1);
    let mut ns = SignalNamespace::new();
    assert!(matches!(
        ns.register_dotted("mem", id[0], &[4]),
        Err(SimError::Shape { .. })
    ));
    assert!(matches!(
        ns.register_dotted("mem", id[0], &[1, 1]),
        Err(SimError::Shape { .. })
    ));
    assert!(ns.is_empty());
}

#[test]
fn test_invalid_paths() {
    for path in ["", ".", "a..b", ".a", "a."] {
        assert!(
            matches!(
                split_path(path),
                Err(SimError::Construction(ConstructionError::InvalidPath { .. }))
            ),
            "{path:?} should be rejected"
        );
    }
    assert_eq!(split_path("top.u0.q").unwrap(), vec!["top", "u0", "q"]);

    let id = ids(1);
    let mut ns = SignalNamespace::new();
    assert!(ns.register(&[], id[0], &[]).is_err());
    assert!(ns.register(&["a", ""], id[0], &[]).is_err());
}

#[test]
fn test_signals_listing_is_sorted() {
    let id = ids(4);
    let mut ns = SignalNamespace::new();
    ns.register_dotted("top.z", id[0], &[]).unwrap();
    ns.register_dotted("top.a.q", id[1], &[]).unwrap();
    ns.register_dotted("clk", id[2], &[]).unwrap();
    ns.register_dotted("top.a.d", id[3], &[]).unwrap();

    assert_eq!(
        ns.signals(),
        vec![
            ("clk".to_owned(), id[2]),
            ("top.a.d".to_owned(), id[3]),
            ("top.a.q".to_owned(), id[1]),
            ("top.z".to_owned(), id[0]),
        ]
    );
}
