use flate2::{write::GzEncoder, Compression};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::ClientBuilder;
use std::fs;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use zomboid_workshop::progress::{ProgressBarOpts, StyleOptions};
use zomboid_workshop::{Fetcher, HttpClientConfig, Layout};
use zip::write::SimpleFileOptions;

// Common test constants
pub const TEST_USER_AGENT: &str = "zomboid-workshop-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `content` to `dir/relative`, creating parent directories
pub fn create_temp_file(dir: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Asserts that a file exists and holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    assert_eq!(content, expected, "Content mismatch at path: {:?}", path);
}

/// Relative paths of every file and directory below `root`, sorted
pub fn list_tree(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).expect("Failed to read directory") {
            let path = entry.expect("Failed to read entry").path();
            let relative = path
                .strip_prefix(root)
                .expect("Entry outside root")
                .to_string_lossy()
                .replace('\\', "/");
            if path.is_dir() {
                out.push(format!("{}/", relative));
                walk(root, &path, out);
            } else {
                out.push(relative);
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

// === Archive Fixtures ===

/// One entry of a fixture archive.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Dir(&'a str, u32),
    File(&'a str, &'a [u8], u32),
}

/// A small SteamCMD-like tree, listing the file before its directory entry.
pub fn steamcmd_fixture() -> Vec<Entry<'static>> {
    vec![
        Entry::File("linux32/steamcmd", b"\x7fELF fake binary", 0o755),
        Entry::Dir("linux32/", 0o755),
        Entry::File("steamcmd.sh", b"#!/bin/sh\nexit 0\n", 0o755),
        Entry::Dir("package/", 0o700),
        Entry::File("linux32/libstdc++.so.6", b"fake library", 0o644),
    ]
}

/// Writes a zip archive at `path`
pub fn build_zip(path: &Path, entries: &[Entry]) {
    let file = fs::File::create(path).expect("Failed to create zip fixture");
    let mut zip = zip::ZipWriter::new(file);
    for entry in entries {
        match *entry {
            Entry::Dir(name, mode) => {
                let options = SimpleFileOptions::default().unix_permissions(mode);
                zip.add_directory(name, options)
                    .expect("Failed to add zip directory");
            }
            Entry::File(name, content, mode) => {
                let options = SimpleFileOptions::default().unix_permissions(mode);
                zip.start_file(name, options).expect("Failed to start zip entry");
                zip.write_all(content).expect("Failed to write zip entry");
            }
        }
    }
    zip.finish().expect("Failed to finish zip fixture");
}

/// Writes a gzip-compressed tar archive at `path`
pub fn build_tar_gz(path: &Path, entries: &[Entry]) {
    let file = fs::File::create(path).expect("Failed to create tar.gz fixture");
    let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for entry in entries {
        let mut header = tar::Header::new_gnu();
        match *entry {
            Entry::Dir(name, mode) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(mode);
                tar.append_data(&mut header, name, io::empty())
                    .expect("Failed to add tar directory");
            }
            Entry::File(name, content, mode) => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_size(content.len() as u64);
                header.set_mode(mode);
                tar.append_data(&mut header, name, content)
                    .expect("Failed to add tar entry");
            }
        }
    }
    tar.into_inner()
        .expect("Failed to finish tar fixture")
        .finish()
        .expect("Failed to finish gzip stream");
}

/// Asserts that `root` holds exactly the tree described by `entries`
pub fn assert_fixture_extracted(root: &Path, entries: &[Entry]) {
    let mut expected: Vec<String> = Vec::new();
    for entry in entries {
        let (name, is_dir) = match *entry {
            Entry::Dir(name, _) => (name.trim_end_matches('/'), true),
            Entry::File(name, _, _) => (name, false),
        };
        let parts: Vec<&str> = name.split('/').collect();
        for depth in 1..parts.len() {
            expected.push(format!("{}/", parts[..depth].join("/")));
        }
        if is_dir {
            expected.push(format!("{}/", name));
        } else {
            expected.push(name.to_string());
        }
    }
    expected.sort();
    expected.dedup();
    assert_eq!(list_tree(root), expected);

    for entry in entries {
        if let Entry::File(name, content, _) = *entry {
            assert_file_content(&root.join(name), content);
        }
    }
}

/// Asserts the permission bits of `path`
#[cfg(unix)]
pub fn assert_mode(path: &Path, expected: u32) {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .unwrap_or_else(|e| panic!("Failed to stat {:?}: {}", path, e))
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, expected, "Mode mismatch at path: {:?}", path);
}

// === HTTP Helpers ===

/// A one-route HTTP server on a random local port.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// URL of `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serves `body` with `status` for `path`, and 404 for anything else.
pub async fn serve(path: &str, status: u16, body: Vec<u8>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");
    let route = format!("/{}", path.trim_start_matches('/'));

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let request = String::from_utf8_lossy(&request);
            let requested = request.split_whitespace().nth(1).unwrap_or("");
            let (code, payload) = if requested == route {
                (status, &body[..])
            } else {
                (404, &b"not found"[..])
            };

            let head = format!(
                "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
                code,
                payload.len()
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(payload).await;
            let _ = socket.shutdown().await;
        }
    });

    TestServer { addr, handle }
}

/// An address nothing listens on
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    addr
}

/// Fetcher ignoring proxy environment variables, for talking to [`serve`]
pub fn local_fetcher() -> Fetcher {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build test client");
    Fetcher::new(ClientBuilder::new(client).build(), ProgressBarOpts::hidden())
}

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        proxy: None,
        headers: Some(create_test_headers()),
    }
}

// === SteamCMD Stub ===

/// A shell script accepting the SteamCMD command line.
pub struct StubTool {
    pub path: PathBuf,
    pub log: PathBuf,
}

impl StubTool {
    /// Identifiers the stub was invoked with, in order
    pub fn invocations(&self) -> Vec<String> {
        match fs::read_to_string(&self.log) {
            Ok(log) => log.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Writes a stub SteamCMD into `dir`.
///
/// For each identifier it records the call, then either exits with status 8
/// when listed in `failing`, or writes
/// `<force_install_dir>/steamapps/workshop/content/108600/<id>/mods/<name>/mod.info`
/// using the name paired with the identifier in `payloads` (`Mod<id>` when
/// unpaired).
#[cfg(unix)]
pub fn create_stub_steamcmd(dir: &Path, payloads: &[(&str, &str)], failing: &[&str]) -> StubTool {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("steamcmd stub.sh");
    let log = dir.join("invocations.log");

    let mut names = String::new();
    for (id, name) in payloads {
        names.push_str(&format!("  {}) name={} ;;\n", id, name));
    }

    let script = format!(
        r#"#!/bin/sh
[ "$1" = "+force_install_dir" ] || {{ echo "unexpected argument $1" >&2; exit 2; }}
[ "$5" = "+workshop_download_item" ] && [ "$6" = "108600" ] || {{ echo "unexpected item arguments" >&2; exit 2; }}
install_dir="$2"
id="$7"
echo "$id" >> '{log}'
echo "Downloading item $id ..."
case " {failing} " in
  *" $id "*) echo "ERROR! Download item $id failed (Failure)." >&2; exit 8 ;;
esac
name="Mod$id"
case "$id" in
{names}esac
target="$install_dir/steamapps/workshop/content/108600/$id/mods/$name"
mkdir -p "$target/media"
echo "name=$name" > "$target/mod.info"
echo "id=$id" > "$target/media/item.txt"
echo "Success. Downloaded item $id to \"$install_dir\""
"#,
        log = log.display(),
        failing = failing.join(" "),
        names = names,
    );

    fs::write(&path, script).expect("Failed to write stub steamcmd");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub steamcmd executable");

    StubTool { path, log }
}

/// A layout rooted in `dir`
pub fn create_test_layout(dir: &Path) -> Layout {
    Layout::new(dir.join("root"))
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::hidden()
}
