//! FIT (Flattened Image Tree) semantic model.
//!
//! Turns a decoded property tree into verified images and resolved
//! configurations. [`Fit::build`] is the single entry point.

pub mod config;
pub mod image;
pub mod model;

pub use config::{assign_loads, resolve_all, resolve_default_name, resolve_one, DEFAULT_LOAD_BASE};
pub use image::extract_all;
pub use model::{Configuration, Fit, HashRecord, Image, ImageLoad, ImageRole};
