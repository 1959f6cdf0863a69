pub mod store_parser;
pub mod store_serializer;

pub use store_parser::{FormatError, parse_store};
pub use store_serializer::serialize_store;
