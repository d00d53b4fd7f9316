use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SchemaError};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_schema_error)
}

/// Raw custom-type JSON, key order preserved.
pub fn read_definition(src: &str) -> Result<Value> {
    from_str_with_path(src)
}

fn into_schema_error(err: serde_path_to_error::Error<serde_json::Error>) -> SchemaError {
    SchemaError::Json {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}
