//! Viewmodel fixtures for inspect development and CI.
//!
//! The bundled models under `data/` are small, synthetic GoldSrc viewmodels
//! whose sequence tables mirror stock Counter-Strike weapons. Their digests
//! are pinned so a silently edited fixture fails loudly.

mod builder;
mod types;

pub use builder::ModelBuilder;
pub use types::{ModelKind, ModelMeta};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use asset_store::{DirAssetStore, MemAssetStore};
use once_cell::sync::{Lazy, OnceCell};
use sha2::{Digest, Sha256};

/// Silencer-aware pistol: silenced and unsilenced inspect pools.
pub const USP: &str = "models/v_usp.mdl";
/// Rifle with a prefixed generic inspect sequence and an integer rate field.
pub const AK47: &str = "models/v_ak47.mdl";
/// Knife without any inspect sequence.
pub const KNIFE: &str = "models/v_knife.mdl";
/// Copy of the rifle with its magic zeroed.
pub const AK47_BAD_MAGIC: &str = "models/v_ak47_badmagic.mdl";

static MODELS: &[ModelMeta] = &[
    ModelMeta {
        name: "v_usp",
        path: USP,
        kind: ModelKind::Inspectable,
        sequences: 14,
        sha256: "4a641e7737771db2287b447b0e5a1ec1f4e87d2f761ef217a8401a04899f0d75",
        size: 2708,
    },
    ModelMeta {
        name: "v_ak47",
        path: AK47,
        kind: ModelKind::Inspectable,
        sequences: 7,
        sha256: "5a37333002727673cc53ab4d4a396e7606479601ed12c70eacdd75bbc1279018",
        size: 1476,
    },
    ModelMeta {
        name: "v_knife",
        path: KNIFE,
        kind: ModelKind::NoInspect,
        sequences: 7,
        sha256: "d7aa4797578dd4da3113ebb9f3894e1c411b3bcd721fed178547f4f15dd6fa84",
        size: 1476,
    },
    ModelMeta {
        name: "v_ak47_badmagic",
        path: AK47_BAD_MAGIC,
        kind: ModelKind::Invalid,
        sequences: 7,
        sha256: "70542de14a230063617739a297625c678742c0a92ee0e18a2336eb769a5f47c8",
        size: 1476,
    },
];

static DATA_DIR: Lazy<PathBuf> =
    Lazy::new(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));

static CACHE: Lazy<Vec<OnceCell<Arc<[u8]>>>> =
    Lazy::new(|| MODELS.iter().map(|_| OnceCell::new()).collect());

/// Returns metadata for every bundled model.
pub fn list() -> &'static [ModelMeta] {
    MODELS
}

/// Looks up model metadata by asset path.
pub fn metadata(path: &str) -> Option<&'static ModelMeta> {
    MODELS.iter().find(|meta| meta.path == path)
}

/// Root directory that fixture asset paths resolve against.
pub fn data_dir() -> &'static Path {
    &DATA_DIR
}

/// Directory-backed store over the bundled fixtures.
pub fn dir_store() -> DirAssetStore {
    DirAssetStore::new(data_dir())
}

/// In-memory store preloaded with every bundled fixture.
pub fn mem_store() -> MemAssetStore {
    let mut store = MemAssetStore::new();
    for meta in MODELS {
        store.insert(meta.path, bytes(meta.path));
    }
    store
}

/// Loads fixture bytes, verifying them against the pinned digest.
pub fn bytes(path: &str) -> Arc<[u8]> {
    let idx = MODELS
        .iter()
        .position(|meta| meta.path == path)
        .unwrap_or_else(|| panic!("unknown fixture path {path}"));
    CACHE[idx]
        .get_or_init(|| {
            let meta = &MODELS[idx];
            let file_path = DATA_DIR.join(meta.path);
            let bytes = std::fs::read(&file_path).unwrap_or_else(|err| {
                panic!("failed to read fixture {path:?}: {err}", path = file_path)
            });

            let digest_hex = hex::encode(Sha256::digest(&bytes));
            assert_eq!(
                digest_hex, meta.sha256,
                "fixture bytes for {} do not match pinned digest",
                meta.path
            );

            Arc::from(bytes.into_boxed_slice())
        })
        .clone()
}
