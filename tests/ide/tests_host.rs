//! AnalysisHost versioning and batch tests.

use std::sync::Arc;
use std::thread;

use dscript::ide::{AnalysisError, AnalysisHost};
use rustc_hash::FxHashMap;

use crate::helpers::source_fixtures::*;

#[test]
fn test_batch_build_publishes_all() {
    let host = AnalysisHost::new();
    let documents: Vec<_> = [SIMPLE_CLASS, SIMPLE_INTERFACE, SIMPLE_ENUM, GREETER]
        .iter()
        .enumerate()
        .map(|(i, source)| (format!("file:///{i}.ds"), source.to_string(), 1))
        .collect();
    let results = host.set_documents(&documents);
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(host.uris().len(), 4);
    let greeter = host.snapshot("file:///3.ds").expect("snapshot");
    assert_eq!(greeter.text(), GREETER);
}

#[test]
fn test_batch_rejects_older_versions() {
    let host = AnalysisHost::new();
    host.set_document("file:///a.ds", SIMPLE_CLASS, 4).expect("commit");
    let results = host.set_documents(&[("file:///a.ds".to_string(), GREETER.to_string(), 2)]);
    assert!(matches!(
        results[0],
        Err(AnalysisError::Superseded { current: 4, .. })
    ));
    assert_eq!(host.snapshot("file:///a.ds").map(|d| d.version()), Some(4));
}

#[test]
fn test_refresh_from_provider() {
    let host = AnalysisHost::new();
    let mut provider: FxHashMap<String, (String, i32)> = FxHashMap::default();
    provider.insert("file:///a.ds".to_string(), (SIMPLE_CLASS.to_string(), 1));

    let doc = host.refresh(&provider, "file:///a.ds").expect("refresh");
    assert_eq!(doc.version(), 1);
    assert_eq!(
        host.refresh(&provider, "file:///missing.ds").map(|_| ()),
        Err(AnalysisError::Unavailable {
            uri: "file:///missing.ds".to_string()
        })
    );

    provider.insert("file:///a.ds".to_string(), (GREETER.to_string(), 2));
    let results = host.refresh_open(&provider);
    assert_eq!(results.len(), 1);
    assert_eq!(host.snapshot("file:///a.ds").map(|d| d.version()), Some(2));
}

#[test]
fn test_readers_keep_snapshots_across_threads() {
    let host = Arc::new(AnalysisHost::new());
    host.set_document("file:///a.ds", GREETER, 1).expect("commit");
    let snapshot = host.snapshot("file:///a.ds").expect("snapshot");

    let writer = {
        let host = Arc::clone(&host);
        thread::spawn(move || {
            for version in 2..20 {
                host.set_document("file:///a.ds", SIMPLE_CLASS, version)
                    .expect("commit");
            }
        })
    };
    // The old tree stays complete while the writer swaps new ones in
    for _ in 0..20 {
        assert_eq!(snapshot.document_symbols().len(), 1);
        assert_eq!(snapshot.version(), 1);
    }
    writer.join().expect("writer");
    assert_eq!(host.snapshot("file:///a.ds").map(|d| d.version()), Some(19));
}

#[test]
fn test_queries_on_closed_document() {
    let host = AnalysisHost::new();
    assert!(matches!(
        host.document_symbols("file:///none.ds"),
        Err(AnalysisError::NotOpen { .. })
    ));
}

#[test]
fn test_close_keeps_stale_builds_out() {
    let host = AnalysisHost::new();
    let uri = "file:///a.ds";
    let in_flight = host.analyze(uri, SIMPLE_CLASS, 1);
    host.set_document(uri, GREETER, 2).expect("commit");
    host.close(uri).expect("close");

    assert!(matches!(
        host.commit(in_flight),
        Err(AnalysisError::Superseded {
            version: 1,
            current: 2,
            ..
        })
    ));
    assert!(host.snapshot(uri).is_none());
    assert!(host.uris().is_empty());

    let reopened = host.open(uri, SIMPLE_ENUM, 1);
    assert_eq!(reopened.text(), SIMPLE_ENUM);
    assert_eq!(host.snapshot(uri).map(|d| d.version()), Some(1));
}
