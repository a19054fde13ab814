//! # fitinfo - FIT Image Parsing & Verification Library
//!
//! A Rust library for parsing and verifying U-Boot compatible FIT
//! (Flattened Image Tree) images.
//!
//! ## Features
//!
//! - Semantic model of a FIT image: images, configurations, load layout
//! - Integrity verification against embedded hash records (MD5, SHA1, CRC32)
//! - Default and per-name configuration resolution with sequential
//!   load-address assignment
//! - Typed errors for every structural, reference, and integrity failure
//! - Adapter from raw FDT blobs via the `device_tree` crate
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitinfo::{Fit, Node};
//!
//! let blob = std::fs::read("image.itb").unwrap();
//! let root = Node::from_dtb(&blob).unwrap();
//!
//! // Build the model: extracts and verifies every image, then resolves
//! // every configuration. Fails on the first integrity or structure error.
//! let fit = Fit::build(&root).unwrap();
//!
//! for (name, image) in fit.images() {
//!     println!("{}: {} bytes", name, image.data.len());
//! }
//! if let Some(conf) = fit.default_configuration() {
//!     for load in &conf.image_list {
//!         println!("{} @ {:#x}", load.image.name, load.load_address);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`tree`] - Decoded property tree input contract and FDT blob adapter
//! - [`prop`] - Raw property value codec (text, u32, u32 array, bytes)
//! - [`hash`] - Hash verification (MD5, SHA1, CRC32)
//! - [`fit`] - Model types and the build pipeline
//! - [`report`] - Text and JSON report rendering
//! - [`error`] - Error types and result definitions

/// Error types and result definitions.
pub mod error;

/// FIT model types and the build pipeline.
pub mod fit;

/// Hash verification (MD5, SHA1, CRC32).
pub mod hash;

/// Raw property value codec.
pub mod prop;

/// Text and JSON report rendering.
pub mod report;

/// Decoded property tree input contract and FDT blob adapter.
pub mod tree;

// Re-export main types for convenience
pub use error::{FitError, HashError, PropError, Result};
pub use fit::{Configuration, Fit, HashRecord, Image, ImageLoad, ImageRole};
pub use hash::HashAlgorithm;
pub use report::FitReport;
pub use tree::Node;

/// Current version of the fitinfo implementation
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
