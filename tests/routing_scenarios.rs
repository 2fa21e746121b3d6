//! End-to-end routing scenarios through `ResourceRouter`, no transport involved.

use std::sync::Arc;
use std::thread;

use resource_router::resource::{status, Payload, ResourceHandler};
use resource_router::routing::{DispatchError, RequestInput, ResourceRouter};

mod common;

use common::Recorder;

#[test]
fn test_nested_read_one() {
    let h = Recorder::new("H");
    let mut builder = ResourceRouter::builder("/");
    builder.register("parent/*/child", h.clone());
    let router = builder.build();

    let resolved = router.resolve("/parent/1/child/2").unwrap();
    assert_eq!(resolved.id.as_deref(), Some("2"));
    assert_eq!(resolved.parent_ids, vec!["1"]);

    let outcome = router.handle("GET", "/parent/1/child/2", RequestInput::default());
    assert_eq!(outcome.status, status::OK);
    assert_eq!(h.calls(), vec![r#"read_one 2 ["1"]"#]);
}

#[test]
fn test_create_on_collection_passes_status_through() {
    struct Accepting;
    impl ResourceHandler for Accepting {
        fn create(&self, parent_ids: &[String], payload: Payload) -> resource_router::Outcome {
            assert!(parent_ids.is_empty());
            assert_eq!(&payload[..], b"b");
            resource_router::Outcome::new(202, "queued")
        }
    }

    let mut builder = ResourceRouter::builder("/");
    builder.register("widgets", Arc::new(Accepting));
    let router = builder.build();

    let resolved = router.resolve("/widgets").unwrap();
    assert_eq!(resolved.id, None);
    assert!(resolved.parent_ids.is_empty());

    let outcome = router.handle("POST", "/widgets", RequestInput::new("b", Default::default()));
    assert_eq!(outcome.status, 202);
    assert_eq!(&outcome.body[..], b"queued");
}

#[test]
fn test_unknown_resource() {
    let mut builder = ResourceRouter::builder("/");
    builder.register("widgets", Recorder::new("W"));
    let router = builder.build();

    let outcome = router.handle("GET", "/unknown", RequestInput::default());
    assert_eq!(outcome.status, status::NOT_FOUND);
    assert!(outcome.body.is_empty());
    assert!(outcome.error.is_none());
}

#[test]
fn test_put_without_id_never_reaches_handler() {
    let w = Recorder::new("W");
    let mut builder = ResourceRouter::builder("/");
    builder.register("widgets", w.clone());
    let router = builder.build();

    let outcome = router.handle("PUT", "/widgets", RequestInput::new("{}", Default::default()));
    assert_eq!(outcome.status, status::BAD_REQUEST);
    let error = outcome.error.unwrap();
    assert_eq!(
        error.downcast_ref::<DispatchError>(),
        Some(&DispatchError::MissingId { method: "PUT" })
    );
    assert!(w.calls().is_empty());
}

#[test]
fn test_full_verb_set_on_deep_nesting() {
    let h = Recorder::new("H");
    let mut builder = ResourceRouter::builder("/api/v1");
    builder.register("grandparent/*/parent/*/child", h.clone());
    let router = builder.build();

    let base = "/api/v1/grandparent/1/parent/2/child";
    let mut query = resource_router::resource::QueryParameters::new();
    query.insert("tag".into(), vec!["a".into(), "b".into()]);

    router.handle("POST", base, RequestInput::new("new", Default::default()));
    router.handle("GET", base, RequestInput::new(Payload::new(), query));
    router.handle("GET", &format!("{}/3", base), RequestInput::default());
    router.handle("PUT", &format!("{}/3", base), RequestInput::new("upd", Default::default()));
    router.handle("DELETE", &format!("{}/3/", base), RequestInput::default());
    router.handle("POST", &format!("{}/3", base), RequestInput::default());
    router.handle("PATCH", &format!("{}/3", base), RequestInput::default());

    assert_eq!(
        h.calls(),
        vec![
            r#"create ["2", "1"] new"#,
            r#"read_many ["2", "1"] [("tag", ["a", "b"])]"#,
            r#"read_one 3 ["2", "1"]"#,
            r#"update 3 ["2", "1"] upd"#,
            r#"delete 3 ["2", "1"]"#,
        ]
    );
}

#[test]
fn test_latest_registration_wins() {
    let first = Recorder::new("first");
    let second = Recorder::new("second");
    let mut builder = ResourceRouter::builder("/");
    builder.register("widgets", first.clone());
    builder.register("widgets", second.clone());
    let router = builder.build();

    let outcome = router.handle("GET", "/widgets/1", RequestInput::default());
    assert_eq!(&outcome.body[..], b"second");
    assert!(first.calls().is_empty());
}

#[test]
fn test_divergent_paths_do_not_match() {
    let mut builder = ResourceRouter::builder("/");
    builder.register("parent/*/child", Recorder::new("H"));
    let router = builder.build();

    for path in ["/parent/1/children/2", "/parents/1/child/2", "/parent/1/child/2/x"] {
        assert!(router.resolve(path).is_none(), "{path}");
    }
}

#[test]
fn test_concurrent_lookups_share_frozen_router() {
    let h = Recorder::new("H");
    let mut builder = ResourceRouter::builder("/");
    builder.register("parent/*/child", h.clone());
    let router = Arc::new(builder.build());

    let workers: Vec<_> = (0..8)
        .map(|n| {
            let router = router.clone();
            thread::spawn(move || {
                let path = format!("/parent/{}/child/{}", n, n * 10);
                let outcome = router.handle("GET", &path, RequestInput::default());
                assert_eq!(outcome.status, status::OK);
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(h.calls().len(), 8);
}
