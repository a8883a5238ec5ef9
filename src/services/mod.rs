pub mod catalog;
pub mod preference_channel;
pub mod recommendations;

pub use catalog::{CatalogAccessor, MemoryCatalog};
pub use preference_channel::{ChannelManager, SessionId};
pub use recommendations::Recommender;
