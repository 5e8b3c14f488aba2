pub mod content;
pub mod person;
pub mod preferences;
pub mod providers;
pub mod search;
pub mod status;

pub use providers::{MetadataProvider, TmdbProvider};
