//! Core type definitions for fixture metadata.

/// What a fixture model is expected to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Valid model with at least one inspect sequence.
    Inspectable,
    /// Valid model without any inspect sequence.
    NoInspect,
    /// Model that must fail header validation.
    Invalid,
}

/// Describes a single fixture model exposed by the `testdata` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMeta {
    /// Friendly name (filename without extension).
    pub name: &'static str,
    /// Asset path relative to the fixture root, as a game would reference it.
    pub path: &'static str,
    /// Behavioural category for reporting.
    pub kind: ModelKind,
    /// Number of records in the sequence table.
    pub sequences: u32,
    /// SHA-256 digest of the file bytes.
    pub sha256: &'static str,
    /// Size of the file in bytes.
    pub size: u64,
}
