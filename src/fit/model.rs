//! Semantic model of a FIT image.
//!
//! All types here are immutable once built. Images are reference-counted:
//! the images table and every configuration that uses an image share the
//! same allocation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{FitError, Result};
use crate::prop;
use crate::tree::Node;

use super::{config, image};

/// A single hash record attached to an image node.
#[derive(Debug, Clone)]
pub struct HashRecord {
    /// Name of the hash child node (`hash` or `hash@N`).
    pub name: String,
    /// Algorithm identifier from the `algo` property.
    pub algo: String,
    /// Stored digest bytes from the `value` property.
    pub value: Vec<u8>,
}

/// A named payload with its metadata, verified against every attached
/// hash record at construction time.
#[derive(Debug, Clone)]
pub struct Image {
    pub name: String,
    pub description: Option<String>,
    /// The FIT `type` property (kernel, flat_dt, ramdisk, ...).
    pub kind: String,
    pub arch: String,
    pub os: Option<String>,
    pub compression: String,
    /// Raw payload bytes, exactly as stored in the tree.
    pub data: Vec<u8>,
    /// The hash records this payload was verified against.
    pub hashes: Vec<HashRecord>,
}

/// The slot an image fills within a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Kernel,
    Fdt,
    Ramdisk,
}

impl ImageRole {
    /// All roles, in the fixed resolution and placement order.
    pub const ALL: [ImageRole; 3] = [Self::Kernel, Self::Fdt, Self::Ramdisk];

    /// The configuration property naming an image for this role.
    pub fn prop_name(self) -> &'static str {
        match self {
            Self::Kernel => "kernel",
            Self::Fdt => "fdt",
            Self::Ramdisk => "ramdisk",
        }
    }
}

/// One image placed at a load address within a configuration.
#[derive(Debug, Clone)]
pub struct ImageLoad {
    pub role: ImageRole,
    pub image: Arc<Image>,
    pub load_address: u64,
}

/// A named bundle of images to be loaded together.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub name: String,
    pub description: Option<String>,
    /// Image placements in kernel → fdt → ramdisk order; absent roles are
    /// simply omitted.
    pub image_list: Vec<ImageLoad>,
}

/// The root aggregate: everything known about a parsed FIT image.
#[derive(Debug, Clone)]
pub struct Fit {
    description: String,
    address_cells: u32,
    timestamp: u32,
    default_config: String,
    images: BTreeMap<String, Arc<Image>>,
    configs: BTreeMap<String, Configuration>,
}

impl Fit {
    /// Builds the full model from a decoded tree root.
    ///
    /// This is the single entry point of the pipeline: image extraction and
    /// hash verification, then configuration resolution with sequential
    /// load-address assignment. All-or-nothing — the first error aborts the
    /// build and no partial model escapes.
    pub fn build(root: &Node) -> Result<Fit> {
        let description = prop::as_text(require(root, "description")?);
        let address_cells = decode_u32(root, require(root, "#address-cells")?, "#address-cells")?;
        let timestamp = decode_u32(root, require(root, "timestamp")?, "timestamp")?;

        let images_node = root
            .child("images")
            .ok_or_else(|| FitError::Structural("images".to_string()))?;
        let configs_node = root
            .child("configurations")
            .ok_or_else(|| FitError::Structural("configurations".to_string()))?;

        let images = image::extract_all(images_node)?;
        let default_config = config::resolve_default_name(configs_node)?;
        let configs = config::resolve_all(configs_node, &images, config::DEFAULT_LOAD_BASE)?;

        Ok(Fit {
            description,
            address_cells,
            timestamp,
            default_config,
            images,
            configs,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address_cells(&self) -> u32 {
        self.address_cells
    }

    /// Build timestamp, seconds since the Unix epoch.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Name carried by the `default` property of `configurations`.
    pub fn default_config_name(&self) -> &str {
        &self.default_config
    }

    /// The images table, keyed and iterated in name order.
    pub fn images(&self) -> &BTreeMap<String, Arc<Image>> {
        &self.images
    }

    /// The configuration table, keyed and iterated in name order.
    pub fn configs(&self) -> &BTreeMap<String, Configuration> {
        &self.configs
    }

    /// The configuration named by `default`, if it exists.
    pub fn default_configuration(&self) -> Option<&Configuration> {
        self.configs.get(&self.default_config)
    }
}

/// Root-level required properties are structural: their absence means the
/// tree is not a FIT at all.
fn require<'a>(root: &'a Node, name: &str) -> Result<&'a [u8]> {
    root.property(name)
        .ok_or_else(|| FitError::Structural(name.to_string()))
}

fn decode_u32(root: &Node, raw: &[u8], name: &str) -> Result<u32> {
    prop::as_u32(raw).map_err(|source| FitError::MalformedProperty {
        node: root.name().to_string(),
        name: name.to_string(),
        source,
    })
}
