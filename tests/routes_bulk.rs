use files_api_router::path::PathError;
use files_api_router::registry::RegistryError;
use files_api_router::{HttpMethod, Router, RouterError};

#[test]
fn router_when_bulk_routes_registered_then_returns_assigned_keys() {
    let router = Router::new(None).expect("router should build");
    let keys = router
        .add_bulk(vec![
            (HttpMethod::Get, "/bulk/one".to_string(), "one"),
            (HttpMethod::Get, "/bulk/two".to_string(), "two"),
            (HttpMethod::Post, "/bulk/post".to_string(), "post"),
        ])
        .expect("bulk insert should succeed");

    assert_eq!(keys, vec![0, 1, 2]);

    router.seal();
    for (method, path, handler) in [
        (HttpMethod::Get, "/bulk/one", "one"),
        (HttpMethod::Get, "/bulk/two", "two"),
        (HttpMethod::Post, "/bulk/post", "post"),
    ] {
        let matched = router
            .find(method, path)
            .unwrap_or_else(|err| panic!("{method} {path} should match: {err}"));
        assert_eq!(*matched.handler(), handler);
    }
}

#[test]
fn router_when_bulk_routes_include_invalid_path_then_returns_error() {
    let router = Router::new(None).expect("router should build");
    let err = router.add_bulk(vec![
        (HttpMethod::Get, "/valid".to_string(), "valid"),
        (HttpMethod::Get, "/\tinvalid".to_string(), "invalid"),
    ]);

    match err.expect_err("expected invalid path error") {
        RouterError::Registry(RegistryError::Path(PathError::ControlOrWhitespace {
            byte, ..
        })) => {
            assert_eq!(byte, b'\t');
        }
        other => panic!("unexpected error: {other:?}"),
    }

    router.seal();
    assert!(router.find(HttpMethod::Get, "/valid").is_err());
}

#[test]
fn router_when_bulk_routes_added_after_seal_then_returns_error() {
    let router = Router::new(None).expect("router should build");
    router
        .add(HttpMethod::Get, "/once", "once")
        .expect("initial add should succeed");
    router.seal();

    let err = router.add_bulk(vec![(HttpMethod::Get, "/again".to_string(), "again")]);
    match err.expect_err("expected bulk add while sealed error") {
        RouterError::BulkAddWhileSealed { count } => {
            assert_eq!(count, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
