//! A built router shared between concurrent readers.

mod common;

use std::sync::Arc;

use trellis_router::{Method, Params};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups() {
    let router = Arc::new(common::router(&[
        "/users/:id",
        "/users/:id/posts/:post",
        "/static/*filepath",
    ]));

    let mut tasks = Vec::new();
    for worker in 0..8 {
        let router = Arc::clone(&router);
        tasks.push(tokio::spawn(async move {
            let mut params = Params::with_capacity(router.max_params());
            for i in 0..500 {
                let path = format!("/users/{worker}/posts/{i}");
                let m = router.lookup(&Method::Get, &path, &mut params, false);
                assert_eq!(m.full_path, Some("/users/:id/posts/:post"));
                assert_eq!(params.parse::<usize>("id"), Some(worker));
                assert_eq!(params.parse::<usize>("post"), Some(i));

                let path = format!("/static/{worker}/{i}.css");
                let m = router.lookup(&Method::Get, &path, &mut params, false);
                assert!(m.is_found());
                assert_eq!(params.by_name("filepath"), format!("/{worker}/{i}.css"));
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}
