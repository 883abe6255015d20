/*! Implementations of [`Tree`](crate::Tree) for other crates.
 *
 * As `impl Tree for Something` doesnt need to be public, they dont show up in rustdoc.
 * See the Cargo.toml for available features.
 */

#[cfg(feature = "json")]
mod common;
#[cfg(feature = "json")]
pub mod json;
