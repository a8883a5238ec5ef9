mod channel;
mod news;
mod product;
mod recommendation;

pub use channel::{InboundMessage, OutboundMessage, UPDATE_PREFERENCES};
pub use news::News;
pub use product::{Category, Product, ProductColor};
pub use recommendation::Recommendation;
