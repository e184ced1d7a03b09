pub mod archive;
pub mod download;
pub mod error;
pub mod godl;
pub mod http;
pub mod install;
pub mod platform;
pub mod runtime;
