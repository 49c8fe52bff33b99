//! File-backed cart persistence.
//!
//! The cart is saved as a small JSON document:
//!
//! ```json
//! { "saved_at": "2026-10-16T09:30:00Z", "cart": [ { "product_id": "...", ... } ] }
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the target, so a
//! crash mid-write leaves the previous cart intact.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use cartwheel_core::{CartRepository, CartState, PersistenceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct SavedCartRef<'a> {
    saved_at: DateTime<Utc>,
    cart: &'a CartState,
}

#[derive(Deserialize)]
struct SavedCart {
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    cart: CartState,
}

/// Saves the cart to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CartRepository for JsonFileRepository {
    fn load(&self) -> Result<CartState, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved cart, starting empty");
                return Ok(CartState::new());
            }
            Err(e) => return Err(e.into()),
        };

        let saved: SavedCart = serde_json::from_str(&contents)?;
        debug!(
            path = %self.path.display(),
            saved_at = ?saved.saved_at,
            lines = saved.cart.len(),
            "Loaded saved cart"
        );
        Ok(saved.cart)
    }

    fn save(&mut self, cart: &CartState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let document = SavedCartRef {
            saved_at: Utc::now(),
            cart,
        };
        let json = serde_json::to_vec_pretty(&document)?;

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), lines = cart.len(), "Saved cart");
        Ok(())
    }
}
