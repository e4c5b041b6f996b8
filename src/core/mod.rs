pub mod config;
pub mod paths;
pub mod release;

pub use config::Config;
pub use release::{Release, ReleaseHandle};
