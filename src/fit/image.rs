//! Image extraction and integrity verification.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::error::{FitError, Result};
use crate::hash;
use crate::tree::Node;

use super::model::{HashRecord, Image};

/// Extracts every child of the `images` node into a verified [`Image`].
///
/// Children are visited in name order so the first failure is deterministic
/// regardless of tree iteration order. Fail-fast: the first missing property
/// or hash mismatch aborts the whole extraction.
pub fn extract_all(images_node: &Node) -> Result<BTreeMap<String, Arc<Image>>> {
    let mut nodes: Vec<&Node> = images_node.children().collect();
    nodes.sort_by(|a, b| a.name().cmp(b.name()));

    let mut table = BTreeMap::new();
    for node in nodes {
        let image = extract_one(node)?;
        table.insert(image.name.clone(), Arc::new(image));
    }
    Ok(table)
}

/// Builds one image from its node, verifying the payload against every
/// attached hash record. An [`Image`] is never observable in a mismatched
/// state: any record failing means no image is produced.
fn extract_one(node: &Node) -> Result<Image> {
    let data = node.bytes_prop("data")?.to_vec();
    let kind = node.text_prop("type")?;
    let arch = node.text_prop("arch")?;
    let compression = node.text_prop("compression")?;
    let description = node.text_prop_opt("description");
    let os = node.text_prop_opt("os");

    debug!(
        "image `{}`: type={kind} arch={arch} compression={compression} ({} bytes)",
        node.name(),
        data.len()
    );

    let hashes = collect_hash_records(node)?;
    for record in &hashes {
        debug!("image `{}`: checking {} `{}`", node.name(), record.algo, record.name);
        hash::verify(&record.algo, &record.value, &data).map_err(|source| {
            FitError::Integrity {
                image: node.name().to_string(),
                record: record.name.clone(),
                source,
            }
        })?;
    }

    Ok(Image {
        name: node.name().to_string(),
        description,
        kind,
        arch,
        os,
        compression,
        data,
        hashes,
    })
}

/// Collects the `hash` / `hash@N` children of an image node, in name order.
/// Each must carry `algo` and `value` sub-properties.
fn collect_hash_records(node: &Node) -> Result<Vec<HashRecord>> {
    let mut hash_nodes: Vec<&Node> = node
        .children()
        .filter(|c| c.name() == "hash" || c.name().starts_with("hash@"))
        .collect();
    hash_nodes.sort_by(|a, b| a.name().cmp(b.name()));

    let mut records = Vec::with_capacity(hash_nodes.len());
    for hash_node in hash_nodes {
        records.push(HashRecord {
            name: hash_node.name().to_string(),
            algo: hash_node.text_prop("algo")?,
            value: hash_node.bytes_prop("value")?.to_vec(),
        });
    }
    Ok(records)
}
