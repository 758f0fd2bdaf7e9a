//! Test helpers laying out datasets and icon directories on disk.

use std::future::Future;
use std::net::TcpListener;

use camino::{Utf8Path, Utf8PathBuf};
use poimap_core::surface::{BASE_ICON_PATH, DUAL_SCRIPT_ICON_PATH};
use serde_json::Value;
use tempfile::TempDir;

pub(super) const DATASET: &str = r#"[
    {"name": "Harbour College", "class": 0, "offical": "https://harbour.example", "cartographic": {"longitude": 113.9, "latitude": 22.5}},
    {"name": "Hillside Institute", "class": "3", "cartographic": {"longitude": 114.0, "latitude": 22.6}},
    {"name": "Unmapped Academy", "class": 1},
    {"name": "Riverside Academy", "class": 2, "cartographic": {"longitude": 114.1, "latitude": 22.7}}
]"#;

const ICON: [u8; 4] = [0x89, 0x50, 0x4e, 0x47];

/// Temporary directory holding a dataset, an icon directory and outputs.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn data_file(&self) -> Utf8PathBuf {
        self.root.join("college.json")
    }

    pub(super) fn icon_dir(&self) -> Utf8PathBuf {
        self.root.join("icons")
    }

    pub(super) fn output(&self) -> Utf8PathBuf {
        self.root.join("out").join("style.json")
    }

    pub(super) fn write_dataset(&self) {
        write_utf8(&self.data_file(), DATASET.as_bytes());
    }

    pub(super) fn write_icons(&self) {
        for path in [BASE_ICON_PATH, DUAL_SCRIPT_ICON_PATH] {
            let name = Utf8Path::new(path).file_name().expect("icon file name");
            write_utf8(&self.icon_dir().join(name), &ICON);
        }
    }

    pub(super) fn read_output(&self) -> Value {
        let bytes = poimap_fs::read_bytes(&self.output()).expect("read output");
        serde_json::from_slice(&bytes).expect("output should be JSON")
    }
}

pub(super) fn write_utf8(path: &Utf8Path, bytes: &[u8]) {
    poimap_fs::write_bytes(path, bytes).expect("write test file");
}

/// Base URL on which nothing listens.
pub(super) fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind a free port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub(super) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

pub(super) fn array_len(document: &Value, key: &str) -> usize {
    document.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}
