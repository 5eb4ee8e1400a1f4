use serde::de::DeserializeOwned;
use serde::Serialize;

use nexus_store::{KeyValueStore, StoreError};

use crate::error::Result;

/// Read `key`, treating undecodable text as "nothing saved".
pub(crate) fn load_lenient<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match nexus_store::load_json(storage, key) {
        Ok(value) => Ok(value),
        Err(StoreError::Corrupt { key, source }) => {
            tracing::warn!(key = %key, error = %source, "ignoring corrupt stored value");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn save<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    nexus_store::save_json(storage, key, value)?;
    Ok(())
}
