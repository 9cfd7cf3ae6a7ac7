pub mod core;
pub mod mochi;
pub mod persistence;
pub mod segmentation;
pub mod settings;
pub mod sync;
