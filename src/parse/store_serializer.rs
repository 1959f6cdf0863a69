use crate::model::store::TaskStore;
use crate::parse::store_parser::FormatError;

/// Serialize a store to its persisted JSON form (pretty-printed, trailing newline).
pub fn serialize_store(store: &TaskStore) -> Result<Vec<u8>, FormatError> {
    let mut out = serde_json::to_vec_pretty(&store.days)?;
    out.push(b'\n');
    Ok(out)
}
