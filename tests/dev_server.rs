//! End-to-end behaviour of the dev server over its HTTP surface.

use std::time::Duration;

use axum::http::{header, Method, StatusCode};

use userscript_dev_server::http::HttpServer;
use userscript_dev_server::lifecycle::{Shutdown, StartupError};

mod common;

use common::{fixture, get, request, version_of};

#[tokio::test]
async fn serves_rewritten_script() {
    let fx = fixture();
    let res = get(&fx.router(), "/foo.user.js").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("// @name [DEV] Foo\n"));
    assert!(res.body.contains("// @namespace http://example.com/dev\n"));
    assert!(!res.body.contains("@icon"));
    assert!(res.body.contains("// @grant none\n"));
    assert!(res.body.ends_with("console.log('foo');\n"));
    assert!(version_of(&res.body) > 1_600_000_000_000);

    assert_eq!(res.headers[header::CONTENT_TYPE], "application/javascript; charset=utf-8");
    assert_eq!(res.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(res.headers[header::CACHE_CONTROL], "no-store, no-cache, must-revalidate");
    assert_eq!(res.headers[header::PRAGMA], "no-cache");
    assert_eq!(res.headers[header::EXPIRES], "0");
}

#[tokio::test]
async fn file_on_disk_is_never_modified() {
    let fx = fixture();
    let _ = get(&fx.router(), "/foo.user.js").await;
    let on_disk = std::fs::read_to_string(fx.scripts().join("foo.user.js")).unwrap();
    assert_eq!(on_disk, common::FOO_SCRIPT);
}

#[tokio::test]
async fn query_string_is_ignored() {
    let fx = fixture();
    let res = get(&fx.router(), "/foo.user.js?cache=bust").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("[DEV] Foo"));
}

#[tokio::test]
async fn versions_never_decrease_across_requests() {
    let fx = fixture();
    let router = fx.router();

    let first = tokio::spawn({
        let router = router.clone();
        async move { get(&router, "/foo.user.js").await }
    })
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = tokio::spawn(async move { get(&router, "/foo.user.js").await })
        .await
        .unwrap();

    assert!(version_of(&first.body) <= version_of(&second.body));
}

#[tokio::test]
async fn concurrent_requests_all_succeed() {
    let fx = fixture();
    let router = fx.router();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let router = router.clone();
            tokio::spawn(async move { get(&router, "/foo.user.js").await })
        })
        .collect();
    for handle in handles {
        let res = handle.await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.matches("[DEV] ").count(), 1);
    }
}

#[tokio::test]
async fn traversal_is_forbidden() {
    let fx = fixture();
    let router = fx.router();

    for path in [
        "/../../etc/passwd.user.js",
        "/../secret.user.js",
        "/%2e%2e/secret.user.js",
        "/..%2Fsecret.user.js",
        "/../secret.html",
        "/../secret-image.png",
    ] {
        let res = get(&router, path).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN, "{path}");
        assert!(!res.body.contains("Secret"), "{path}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_escape_is_forbidden() {
    let fx = fixture();
    std::os::unix::fs::symlink(
        fx.dir.path().join("secret.user.js"),
        fx.scripts().join("linked.user.js"),
    )
    .unwrap();

    let res = get(&fx.router(), "/linked.user.js").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn undecodable_path_is_forbidden() {
    let fx = fixture();
    let res = get(&fx.router(), "/bad%ff.user.js").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_script_is_not_found() {
    let fx = fixture();
    let res = get(&fx.router(), "/missing.user.js").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_utf8_script_is_server_error() {
    let fx = fixture();
    let res = get(&fx.router(), "/broken.user.js").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.starts_with("Error processing broken.user.js"));
}

#[tokio::test]
async fn index_lists_scripts_and_visible_pages() {
    let fx = fixture();
    for path in ["/", "/index.html"] {
        let res = get(&fx.router(), path).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(res.headers[header::CACHE_CONTROL], "no-store, no-cache, must-revalidate");
        assert!(res.body.contains(r#"<a href="/foo.user.js">foo.user.js</a>"#));
        assert!(res.body.contains(r#"<a href="/broken.user.js">broken.user.js</a>"#));
        assert!(res.body.contains(r#"<a href="/video.html">video.html</a>"#));
        assert!(!res.body.contains("video-helper.html"));
        assert!(!res.body.contains("logo.png"));
    }
}

#[tokio::test]
async fn index_is_read_fresh() {
    let fx = fixture();
    std::fs::write(fx.scripts().join("new.user.js"), "// @name New\n").unwrap();
    let res = get(&fx.router(), "/").await;
    assert!(res.body.contains(r#"href="/new.user.js""#));
}

#[tokio::test]
async fn favicon_is_no_content() {
    let fx = fixture();
    let res = get(&fx.router(), "/favicon.ico").await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn pages_are_served_verbatim() {
    let fx = fixture();
    let router = fx.router();

    let res = get(&router, "/video.html").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "<video></video>");
    assert_eq!(res.headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(res.headers[header::PRAGMA], "no-cache");

    // Hidden from the index, still reachable.
    let helper = get(&router, "/video-helper.html").await;
    assert_eq!(helper.status, StatusCode::OK);
    assert_eq!(helper.body, "<p>helper</p>");
}

#[tokio::test]
async fn missing_page_falls_through_to_scripts_root() {
    let fx = fixture();
    let router = fx.router();

    let demo = get(&router, "/demo.html").await;
    assert_eq!(demo.status, StatusCode::OK);
    assert_eq!(demo.body, "<p>demo</p>");

    let missing = get(&router, "/nothing.html").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_page_is_tried_as_script_before_static() {
    let dir = tempfile::tempdir().unwrap();
    common::build_tree(dir.path());
    std::fs::write(dir.path().join("test/harness.user.js"), "// @name Harness\n").unwrap();

    let mut config = common::config_for(dir.path());
    config.routing.page_suffixes = vec![".js".into()];
    let router = HttpServer::new(&config).unwrap().router();

    let script = get(&router, "/foo.user.js").await;
    assert_eq!(script.status, StatusCode::OK);
    assert!(script.body.contains("// @name [DEV] Foo\n"));
    assert_eq!(script.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(script.headers[header::CACHE_CONTROL], "no-store, no-cache, must-revalidate");

    // Present under the pages root: the page rule wins and serves it verbatim.
    let page = get(&router, "/harness.user.js").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body, "// @name Harness\n");
}

#[tokio::test]
async fn static_assets_pass_through() {
    let fx = fixture();
    let res = get(&fx.router(), "/assets/logo.png").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[header::CONTENT_TYPE], "image/png");
    assert!(res.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

    let dir = get(&fx.router(), "/assets").await;
    assert_eq!(dir.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_get_is_served() {
    let fx = fixture();
    let res = request(&fx.router(), Method::POST, "/foo.user.js").await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let fx = fixture();
    let res = get(&fx.router(), "/favicon.ico").await;
    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn missing_pages_root_disables_pages_only() {
    let dir = tempfile::tempdir().unwrap();
    common::build_tree(dir.path());
    std::fs::remove_dir_all(dir.path().join("test")).unwrap();

    let server = HttpServer::new(&common::config_for(dir.path())).unwrap();
    let router = server.router();

    let index = get(&router, "/").await;
    assert_eq!(index.status, StatusCode::OK);
    assert!(index.body.contains("No test pages."));

    assert_eq!(get(&router, "/video.html").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/foo.user.js").await.status, StatusCode::OK);
}

#[tokio::test]
async fn missing_scripts_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = HttpServer::new(&common::config_for(dir.path())).err().unwrap();
    assert!(matches!(err, StartupError::ScriptsRoot { .. }));
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down_gracefully() {
    let fx = fixture();
    let server = HttpServer::new(&common::config_for(fx.dir.path())).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move { server.run(listener, &server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{}/foo.user.js", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body = res.text().await.unwrap();
    assert!(body.contains("// @name [DEV] Foo"));

    shutdown.trigger();
    let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn shutdown_requested_before_start_still_stops() {
    let fx = fixture();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let shutdown = Shutdown::new();
    shutdown.trigger();
    let server = HttpServer::new(&common::config_for(fx.dir.path())).unwrap();

    let outcome = tokio::time::timeout(Duration::from_secs(5), server.run(listener, &shutdown))
        .await
        .expect("server ignored an earlier shutdown request");
    assert!(outcome.is_ok());
}
