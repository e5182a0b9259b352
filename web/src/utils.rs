use gloo::storage::{LocalStorage, Storage};

/// Fixed LocalStorage key under which a persisted type lives.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Fetch the raw blob stored under `key`, if any.
pub(crate) fn storage_get(key: &str) -> Option<String> {
    match LocalStorage::raw().get_item(key) {
        Ok(blob) => blob,
        Err(err) => {
            log::error!("Could not read local storage: {:?}", err);
            None
        }
    }
}

/// Store a raw blob under `key`.
pub(crate) fn storage_set(key: &str, blob: &str) {
    if let Err(err) = LocalStorage::raw().set_item(key, blob) {
        log::error!("Could not save state to local storage: {:?}", err);
    }
}

/// Drop whatever is stored under `key`.
pub(crate) fn storage_remove(key: &str) {
    if let Err(err) = LocalStorage::raw().remove_item(key) {
        log::error!("Could not clear local storage: {:?}", err);
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
