pub mod errors;
pub mod pipeline;

pub use errors::MochiSyncError;
