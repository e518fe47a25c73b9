use web_sys::Storage;

/// localStorage key holding the backend session identifier.
const SESSION_KEY: &str = "session_id";

/// Key/value store the session id lives in; `localStorage` in the browser.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
    fn erase(&self, key: &str) -> Result<(), String>;
}

impl SessionStorage for Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.set_item(key, value).map_err(|e| format!("{e:?}"))
    }

    fn erase(&self, key: &str) -> Result<(), String> {
        self.remove_item(key).map_err(|e| format!("{e:?}"))
    }
}

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_from(storage: &impl SessionStorage) -> Option<String> {
    storage.read(SESSION_KEY).filter(|id| !id.trim().is_empty())
}

pub fn store_in(storage: &impl SessionStorage, session_id: &str) -> Result<(), String> {
    storage.write(SESSION_KEY, session_id)
}

pub fn clear_from(storage: &impl SessionStorage) -> Result<(), String> {
    storage.erase(SESSION_KEY)
}

/// Returns the stored session id; missing storage counts as no session.
pub fn load() -> Option<String> {
    load_from(&storage()?)
}

pub fn store(session_id: &str) {
    let Some(storage) = storage() else {
        log::warn!("localStorage unavailable; session id kept in memory only");
        return;
    };
    if let Err(e) = store_in(&storage, session_id) {
        log::warn!("Failed to persist session id: {e}");
    }
}

/// Forgets the stored session so the next visit starts at the upload view.
pub fn clear() {
    let Some(storage) = storage() else {
        return;
    };
    if let Err(e) = clear_from(&storage) {
        log::warn!("Failed to clear session id: {e}");
    }
}
