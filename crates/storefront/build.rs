//! Build script for storefront crate.
//!
//! Generates content-based hashes for static assets (stylesheet and the
//! cart sidebar script) so they can be served with immutable caching.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// A static asset that gets a hashed copy under `derived/`.
struct Asset {
    /// Path relative to the crate root.
    source: &'static str,
    /// File stem used for the hashed copy.
    stem: &'static str,
    /// File extension used for the hashed copy.
    extension: &'static str,
    /// Compile-time environment variable receiving the hash.
    env_var: &'static str,
}

const ASSETS: &[Asset] = &[
    Asset {
        source: "static/css/main.css",
        stem: "main",
        extension: "css",
        env_var: "CSS_HASH",
    },
    Asset {
        source: "static/js/cart.js",
        stem: "cart",
        extension: "js",
        env_var: "JS_HASH",
    },
];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");

    for asset in ASSETS {
        hash_asset(Path::new(&manifest_dir), asset);
    }
}

/// Hash an asset and copy it next to itself as `derived/<stem>.<hash>.<ext>`.
fn hash_asset(manifest_dir: &Path, asset: &Asset) {
    let source = manifest_dir.join(asset.source);
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", asset.source);
            println!("cargo:rustc-env={}=", asset.env_var);
            return;
        }
    };

    // First 8 hex chars of SHA-256
    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = &hash[..8];

    println!("cargo:rustc-env={}={short_hash}", asset.env_var);

    let derived_dir = source
        .parent()
        .expect("asset path has a parent directory")
        .join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");

    let derived_path = derived_dir.join(format!(
        "{}.{short_hash}.{}",
        asset.stem, asset.extension
    ));
    fs::copy(&source, &derived_path).expect("Failed to copy asset to derived directory");
}
