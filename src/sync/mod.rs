pub mod reconciler;

pub use reconciler::{
    reconcile,
    CardStore,
    SyncOutcome,
};

#[cfg(test)]
mod reconciler_tests;
