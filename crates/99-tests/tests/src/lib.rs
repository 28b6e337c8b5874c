//! Cross-crate scenarios for the inspect feature.

#[cfg(test)]
mod support;

#[cfg(test)]
mod scenarios;

#[cfg(test)]
mod multiplayer;

#[cfg(test)]
mod properties;
