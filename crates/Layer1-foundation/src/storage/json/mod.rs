mod store;

pub use store::{write_json, JsonStore};
