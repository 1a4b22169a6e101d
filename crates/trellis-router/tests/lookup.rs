//! Matching concrete paths against registered patterns.

mod common;

use common::{get, params, router, Outcome};

fn found(handler: &'static str, pairs: &[(&str, &str)]) -> Outcome {
    Outcome {
        handler: Some(handler),
        params: params(pairs),
        tsr: false,
    }
}

#[test]
fn test_wildcard_routes() {
    let router = router(&[
        "/",
        "/cmd/:tool/:sub",
        "/cmd/:tool/",
        "/src/*filepath",
        "/search/",
        "/search/:query",
        "/user_:name",
        "/user_:name/about",
        "/files/:dir/*filepath",
        "/doc/",
        "/doc/go_faq.html",
        "/doc/go1.html",
        "/info/:user/public",
        "/info/:user/project",
    ]);

    let cases: Vec<(&str, Option<(&str, Vec<(&str, &str)>)>)> = vec![
        ("/", Some(("/", vec![]))),
        ("/cmd/test/", Some(("/cmd/:tool/", vec![("tool", "test")]))),
        ("/cmd/test", None),
        (
            "/cmd/test/3",
            Some(("/cmd/:tool/:sub", vec![("tool", "test"), ("sub", "3")])),
        ),
        ("/src/", Some(("/src/*filepath", vec![("filepath", "/")]))),
        (
            "/src/some/file.png",
            Some(("/src/*filepath", vec![("filepath", "/some/file.png")])),
        ),
        ("/search/", Some(("/search/", vec![]))),
        (
            "/search/someth!ng+in+ünìcodé",
            Some(("/search/:query", vec![("query", "someth!ng+in+ünìcodé")])),
        ),
        ("/search/someth!ng+in+ünìcodé/", None),
        ("/user_gopher", Some(("/user_:name", vec![("name", "gopher")]))),
        (
            "/user_gopher/about",
            Some(("/user_:name/about", vec![("name", "gopher")])),
        ),
        (
            "/files/js/inc/framework.js",
            Some((
                "/files/:dir/*filepath",
                vec![("dir", "js"), ("filepath", "/inc/framework.js")],
            )),
        ),
        (
            "/info/gordon/public",
            Some(("/info/:user/public", vec![("user", "gordon")])),
        ),
        (
            "/info/gordon/project",
            Some(("/info/:user/project", vec![("user", "gordon")])),
        ),
    ];

    for (path, expected) in cases {
        let outcome = get(&router, path);
        match expected {
            Some((handler, pairs)) => {
                assert_eq!(outcome, found(handler, &pairs), "lookup {path}");
            }
            None => assert_eq!(outcome.handler, None, "lookup {path}"),
        }
    }
}

#[test]
fn test_captures_round_trip() {
    let patterns = [
        "/users/:id",
        "/users/:id/posts/:post",
        "/orgs/:org/repos/:repo/tree/*path",
        "/v:version/status",
    ];
    let router = router(&patterns);

    let values = ["42", "hello-world", "x.y_z"];
    for pattern in patterns {
        let mut concrete = String::new();
        let mut expected = Vec::new();
        let mut value = values.iter().cycle();
        for element in pattern.split('/').skip(1) {
            concrete.push('/');
            match element.find([':', '*']) {
                Some(start) => {
                    let v = value.next().unwrap();
                    let (name, captured) = if element[start..].starts_with('*') {
                        (&element[start + 1..], format!("/{v}/more"))
                    } else {
                        (&element[start + 1..], (*v).to_string())
                    };
                    concrete.push_str(&element[..start]);
                    if captured.starts_with('/') {
                        concrete.pop();
                    }
                    concrete.push_str(&captured);
                    expected.push((name.to_string(), captured));
                }
                None => concrete.push_str(element),
            }
        }

        let outcome = get(&router, &concrete);
        assert_eq!(outcome.handler, Some(pattern), "lookup {concrete}");
        assert_eq!(outcome.params, expected, "captures of {concrete}");
    }
}

#[test]
fn test_catch_all_needs_its_own_parent_route() {
    let router = router(&["/files/*filepath"]);

    assert_eq!(
        get(&router, "/files/a/b/c"),
        found("/files/*filepath", &[("filepath", "/a/b/c")])
    );

    let bare = get(&router, "/files");
    assert_eq!(bare.handler, None);
    assert!(bare.tsr);

    let router = common::router(&["/files", "/files/*filepath"]);
    assert_eq!(get(&router, "/files"), found("/files", &[]));
    assert_eq!(
        get(&router, "/files/"),
        found("/files/*filepath", &[("filepath", "/")])
    );
}

#[test]
fn test_shared_capture_with_diverging_tails() {
    let router = router(&["/a/:x", "/a/:x/b"]);
    assert_eq!(get(&router, "/a/1"), found("/a/:x", &[("x", "1")]));
    assert_eq!(get(&router, "/a/1/b"), found("/a/:x/b", &[("x", "1")]));
    assert_eq!(get(&router, "/a/1/c").handler, None);
}

#[test]
fn test_extension_methods_have_their_own_tree() {
    use trellis_router::{Method, Params};

    let mut router = common::router(&["/cache/:key"]);
    router.handle("PURGE", "/cache/*all", vec!["purge"]).unwrap();

    let mut params = Params::new();
    let purge = Method::parse("PURGE").unwrap();
    let m = router.lookup(&purge, "/cache/a/b", &mut params, false);
    assert_eq!(m.full_path, Some("/cache/*all"));
    assert_eq!(params.get("all"), Some("/a/b"));

    let m = router.lookup(&Method::Get, "/cache/a", &mut params, false);
    assert_eq!(m.full_path, Some("/cache/:key"));
    assert_eq!(params.len(), 1);
}
