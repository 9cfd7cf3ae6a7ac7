pub mod api;
pub mod types;

pub use api::MochiClient;
pub use types::{
    Card,
    Deck,
    Template,
};
