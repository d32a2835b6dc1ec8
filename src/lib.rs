//! Envtag - load `.env` files into the environment and map it to typed records.
//!
//! This library provides:
//! - Line-oriented parsing of `KEY=VALUE` files with quote and comment handling
//! - Ordered, best-effort collection of env files into an environment store
//! - Decoding tagged struct fields from the environment with scalar coercion
//! - Encoding tagged struct fields back into env file lines
//!
//! # Example
//!
//! ```no_run
//! envtag::env_record! {
//!     #[derive(Debug, Default)]
//!     pub struct AppConfig {
//!         pub host: String => "APP_HOST",
//!         pub port: u16 => "APP_PORT",
//!         pub debug: bool => "APP_DEBUG",
//!     }
//! }
//!
//! fn main() -> envtag::Result<()> {
//!     // Load .env then .env.local into the process environment
//!     envtag::init();
//!
//!     let mut config = AppConfig {
//!         port: 8080,
//!         ..Default::default()
//!     };
//!     envtag::decode(&mut config)?;
//!
//!     let lines = envtag::encode(&config)?;
//!     print!("{}", String::from_utf8_lossy(&lines));
//!     Ok(())
//! }
//! ```

pub mod collect;
pub mod error;
pub mod exec;
pub mod mapper;
pub mod parse;
pub mod store;

pub use collect::{DEFAULT_FILENAMES, Loader, collect};
pub use error::{EnvtagError, Result};
pub use mapper::{EnvRecord, Field, decode, decode_any, decode_from, encode, encode_any};
pub use parse::{Entry, normalize};
pub use store::{EnvStore, MemoryEnv, ProcessEnv};

/// Load [`DEFAULT_FILENAMES`] from the current directory into the process
/// environment.
///
/// Call this first thing in `main`, before spawning threads.
pub fn init() {
	Loader::new().collect();
}
