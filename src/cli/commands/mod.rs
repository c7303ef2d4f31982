mod context;
pub mod init;
pub mod locate;
pub mod preview;
pub mod watch;

pub use context::Workspace;
