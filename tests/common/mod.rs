//! Shared fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use userscript_dev_server::config::ServerConfig;
use userscript_dev_server::http::HttpServer;

pub const FOO_SCRIPT: &str = "\
// ==UserScript==
// @name Foo
// @namespace http://example.com
// @version 1.0
// @icon http://example.com/i.png
// @grant none
// ==/UserScript==

console.log('foo');
";

/// A served tree on disk:
///
/// ```text
/// <tmp>/secret.user.js          outside every root
/// <tmp>/scripts/foo.user.js
/// <tmp>/scripts/broken.user.js  not UTF-8
/// <tmp>/scripts/demo.html       page suffix, but only under scripts
/// <tmp>/scripts/assets/logo.png
/// <tmp>/test/video.html
/// <tmp>/test/video-helper.html
/// ```
pub struct Fixture {
    pub dir: TempDir,
    pub server: HttpServer,
}

impl Fixture {
    pub fn scripts(&self) -> PathBuf {
        self.dir.path().join("scripts")
    }

    pub fn router(&self) -> Router {
        self.server.router()
    }
}

pub fn build_tree(root: &Path) {
    let scripts = root.join("scripts");
    let pages = root.join("test");
    fs::create_dir_all(scripts.join("assets")).unwrap();
    fs::create_dir_all(&pages).unwrap();

    fs::write(scripts.join("foo.user.js"), FOO_SCRIPT).unwrap();
    fs::write(scripts.join("broken.user.js"), [b'/', b'/', b' ', 0xff, 0xfe, b'\n']).unwrap();
    fs::write(scripts.join("demo.html"), "<p>demo</p>").unwrap();
    fs::write(scripts.join("assets/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::write(pages.join("video.html"), "<video></video>").unwrap();
    fs::write(pages.join("video-helper.html"), "<p>helper</p>").unwrap();
    fs::write(root.join("secret.user.js"), "// @name Secret\n").unwrap();
}

pub fn config_for(root: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.directories.scripts_root = root.join("scripts");
    config.directories.pages_root = root.join("test");
    config
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    build_tree(dir.path());
    let server = HttpServer::new(&config_for(dir.path())).unwrap();
    Fixture { dir, server }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn request(router: &Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    request(router, Method::GET, uri).await
}

/// Value of the first `// @version` line.
pub fn version_of(body: &str) -> u64 {
    body.lines()
        .find_map(|line| line.strip_prefix("// @version "))
        .expect("no @version line")
        .trim()
        .parse()
        .expect("@version is not numeric")
}
