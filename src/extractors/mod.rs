//! Request extractors that reject with the API's `{message}` error body.

mod json;
mod part_id;
pub use json::JsonBody;
pub use part_id::PartIdPath;
