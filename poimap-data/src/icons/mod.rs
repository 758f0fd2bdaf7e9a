//! [`IconLoader`](poimap_core::IconLoader) adapters for HTTP and local files.

mod file;
mod http;

pub use file::FsIconLoader;
pub use http::HttpIconLoader;
