pub mod handlers;
pub mod items;
pub mod migration;
pub mod store;

pub use store::{ProfileStore, SavedProfile};
