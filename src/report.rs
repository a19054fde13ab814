//! Report rendering for parsed FIT images.
//!
//! Summarizes a [`Fit`] for display, as plain text or JSON. Images and
//! configurations are listed in name order; the model's tables already
//! iterate sorted, so the report is deterministic.

use std::fmt::Write as _;

use serde::Serialize;

use crate::fit::{Configuration, Fit, Image};

/// A serializable summary of a parsed and verified FIT image.
#[derive(Debug, Serialize)]
pub struct FitReport {
    pub description: String,
    pub address_cells: u32,
    pub timestamp: u32,
    pub default_config: String,
    pub images: Vec<ImageSummary>,
    pub configs: Vec<ConfigSummary>,
}

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub arch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    pub compression: String,
    pub size: usize,
    /// Algorithm names of the hash records the payload verified against.
    pub verified: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub loads: Vec<LoadSummary>,
}

#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub role: &'static str,
    pub image: String,
    pub address: u64,
}

impl FitReport {
    pub fn new(fit: &Fit) -> Self {
        Self {
            description: fit.description().to_string(),
            address_cells: fit.address_cells(),
            timestamp: fit.timestamp(),
            default_config: fit.default_config_name().to_string(),
            images: fit.images().values().map(|i| ImageSummary::new(i)).collect(),
            configs: fit.configs().values().map(ConfigSummary::new).collect(),
        }
    }

    /// Keeps only the named configuration in the report.
    pub fn retain_config(&mut self, name: &str) {
        self.configs.retain(|c| c.name == name);
    }

    /// Renders the report as indented plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "FIT: {} (timestamp {}, #address-cells {})",
            self.description, self.timestamp, self.address_cells
        );
        let _ = writeln!(out, "default configuration: {}", self.default_config);

        let _ = writeln!(out, "images:");
        for image in &self.images {
            let _ = writeln!(
                out,
                "  {}: {} {} {}, {} bytes, verified [{}]",
                image.name,
                image.kind,
                image.arch,
                image.compression,
                image.size,
                image.verified.join(", ")
            );
        }

        let _ = writeln!(out, "configurations:");
        for conf in &self.configs {
            match &conf.description {
                Some(text) => {
                    let _ = writeln!(out, "  {}: {}", conf.name, text);
                }
                None => {
                    let _ = writeln!(out, "  {}:", conf.name);
                }
            }
            for load in &conf.loads {
                let _ = writeln!(
                    out,
                    "    {:<7} -> {} @ {:#010x}",
                    load.role, load.image, load.address
                );
            }
        }
        out
    }
}

impl ImageSummary {
    fn new(image: &Image) -> Self {
        Self {
            name: image.name.clone(),
            description: image.description.clone(),
            kind: image.kind.clone(),
            arch: image.arch.clone(),
            os: image.os.clone(),
            compression: image.compression.clone(),
            size: image.data.len(),
            verified: image.hashes.iter().map(|h| h.algo.clone()).collect(),
        }
    }
}

impl ConfigSummary {
    fn new(conf: &Configuration) -> Self {
        Self {
            name: conf.name.clone(),
            description: conf.description.clone(),
            loads: conf
                .image_list
                .iter()
                .map(|load| LoadSummary {
                    role: load.role.prop_name(),
                    image: load.image.name.clone(),
                    address: load.load_address,
                })
                .collect(),
        }
    }
}
