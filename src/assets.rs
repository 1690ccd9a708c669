//! Assets

use std::{
    fs,
    hash::Hasher,
    io,
    path::PathBuf,
};

use rustc_hash::FxHasher;
use thiserror::Error;
use tracing::warn;

use crate::catalog::Product;

/// Errors raised by asset storage.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset exists under the reference.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Underlying storage failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read/write access to product imagery.
pub trait AssetStore {
    /// Fetch the bytes stored under an asset reference.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::NotFound`] when nothing is stored under the
    /// reference, or [`AssetError::Io`] for other storage failures.
    fn load(&self, reference: &str) -> Result<Vec<u8>, AssetError>;

    /// Persist bytes under an asset reference, replacing any existing asset.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the bytes cannot be written.
    fn store(&self, reference: &str, bytes: &[u8]) -> Result<(), AssetError>;
}

/// Filesystem store rooted at the kiosk's asset directory. References are
/// paths relative to the root, such as `images/coffee/espresso.jpg`.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }
}

impl AssetStore for DirectoryStore {
    fn load(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(reference);

        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(reference.to_owned()))
            }
            Err(err) => Err(AssetError::Io(err)),
        }
    }

    fn store(&self, reference: &str, bytes: &[u8]) -> Result<(), AssetError> {
        let path = self.root.join(reference);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, bytes)?;

        Ok(())
    }
}

/// Deterministic placeholder artwork for a product without an image.
///
/// The same product name always produces the same bytes: the backdrop color
/// comes from a hash of the name, with the category and name lettered over
/// it. Output is a small SVG document.
pub fn placeholder_image(name: &str, category: &str) -> Vec<u8> {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    let digest = hasher.finish();

    let hue = digest % 360;
    let lightness = 35 + (digest >> 16) % 20;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300"><rect width="300" height="300" fill="hsl({hue}, 45%, {lightness}%)"/><text x="150" y="140" text-anchor="middle" font-size="20" fill="white">{category}</text><text x="150" y="180" text-anchor="middle" font-size="16" fill="white">{name}</text></svg>"#
    )
    .into_bytes()
}

/// Cache-aside image lookup for the menu screen.
///
/// Stored bytes win; a missing asset is replaced by a generated placeholder
/// that is written back to the store for reuse. Storage failures are logged
/// and absorbed so catalog display is never blocked by imagery.
pub fn load_or_placeholder(store: &impl AssetStore, product: &Product, category: &str) -> Vec<u8> {
    match store.load(&product.image) {
        Ok(bytes) => bytes,
        Err(AssetError::NotFound(_)) => {
            let bytes = placeholder_image(&product.name, category);

            if let Err(err) = store.store(&product.image, &bytes) {
                warn!(image = %product.image, error = %err, "could not persist placeholder");
            }

            bytes
        }
        Err(err) => {
            warn!(image = %product.image, error = %err, "asset load failed, using placeholder");

            placeholder_image(&product.name, category)
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn product(name: &str, image: &str) -> Product {
        Product {
            name: name.to_owned(),
            price: Money::from_minor(399, iso::USD),
            description: String::new(),
            image: image.to_owned(),
        }
    }

    #[test]
    fn store_then_load_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = DirectoryStore::new(dir.path());

        store.store("images/coffee/espresso.jpg", b"espresso bytes")?;
        let bytes = store.load("images/coffee/espresso.jpg")?;

        assert_eq!(bytes, b"espresso bytes");

        Ok(())
    }

    #[test]
    fn missing_asset_is_not_found() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = DirectoryStore::new(dir.path());

        let result = store.load("images/tea/matcha.jpg");

        assert!(matches!(result, Err(AssetError::NotFound(r)) if r == "images/tea/matcha.jpg"));

        Ok(())
    }

    #[test]
    fn placeholder_is_deterministic_per_name() {
        let first = placeholder_image("Cold Brew", "Coffee");
        let second = placeholder_image("Cold Brew", "Coffee");
        let other = placeholder_image("Chai Tea Latte", "Tea");

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn fallback_persists_placeholder_for_reuse() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = DirectoryStore::new(dir.path());
        let espresso = product("Signature Espresso", "images/coffee/espresso.jpg");

        let generated = load_or_placeholder(&store, &espresso, "Coffee");

        // Second lookup hits the persisted copy.
        let cached = store.load("images/coffee/espresso.jpg")?;

        assert_eq!(generated, cached);
        assert_eq!(generated, placeholder_image("Signature Espresso", "Coffee"));

        Ok(())
    }

    #[test]
    fn stored_asset_wins_over_placeholder() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = DirectoryStore::new(dir.path());
        let mocha = product("Mocha Fusion", "images/coffee/mocha.jpg");

        store.store("images/coffee/mocha.jpg", b"real artwork")?;
        let bytes = load_or_placeholder(&store, &mocha, "Coffee");

        assert_eq!(bytes, b"real artwork");

        Ok(())
    }
}
