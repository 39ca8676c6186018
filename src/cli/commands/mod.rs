mod context;
pub mod init;
pub mod status;
pub mod translate;

pub use context::{CommandContext, ConfigPolicy};
