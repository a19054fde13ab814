//! Configuration resolution and load-address assignment.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::error::{FitError, Result};
use crate::tree::Node;

use super::model::{Configuration, Image, ImageLoad, ImageRole};

/// Base of the sequential load-address cursor when no other base is given.
pub const DEFAULT_LOAD_BASE: u64 = 0;

/// Reads the `default` property of the `configurations` node.
pub fn resolve_default_name(configs_node: &Node) -> Result<String> {
    configs_node
        .text_prop_opt("default")
        .ok_or_else(|| FitError::Structural("default".to_string()))
}

/// Resolves one named configuration against the images table.
///
/// References are resolved in the fixed kernel → fdt → ramdisk order; a
/// missing `ramdisk` (or any other role) simply omits that slot, while a
/// reference to an image not present in `images` fails the whole resolution.
pub fn resolve_one(
    configs_node: &Node,
    images: &BTreeMap<String, Arc<Image>>,
    name: &str,
    base: u64,
) -> Result<Configuration> {
    let conf = configs_node
        .child(name)
        .ok_or_else(|| FitError::Structural(format!("configuration {name}")))?;

    let description = conf.text_prop_opt("description");
    if let Some(text) = &description {
        debug!("configuration `{name}`: {text}");
    }

    let mut referenced = Vec::new();
    for role in ImageRole::ALL {
        let Some(image_name) = conf.text_prop_opt(role.prop_name()) else {
            continue;
        };
        let image = images
            .get(&image_name)
            .ok_or_else(|| FitError::UnknownImage {
                configuration: name.to_string(),
                field: role.prop_name(),
                name: image_name.clone(),
            })?;
        referenced.push((role, Arc::clone(image)));
    }

    Ok(Configuration {
        name: name.to_string(),
        description,
        image_list: assign_loads(referenced, base),
    })
}

/// Assigns sequentially packed load addresses.
///
/// A pure fold over the reference list: the cursor starts at `base` and
/// advances by each image's payload length, producing contiguous,
/// non-overlapping placement in list order.
pub fn assign_loads(images: Vec<(ImageRole, Arc<Image>)>, base: u64) -> Vec<ImageLoad> {
    images
        .into_iter()
        .scan(base, |cursor, (role, image)| {
            let load_address = *cursor;
            *cursor += image.data.len() as u64;
            Some(ImageLoad {
                role,
                image,
                load_address,
            })
        })
        .collect()
}

/// Resolves every `conf` / `conf@N` child of the `configurations` node.
///
/// Fail-fast: the first failing configuration aborts the whole table. Names
/// are visited in sorted order so the first failure is deterministic.
pub fn resolve_all(
    configs_node: &Node,
    images: &BTreeMap<String, Arc<Image>>,
    base: u64,
) -> Result<BTreeMap<String, Configuration>> {
    let mut names: Vec<&str> = configs_node
        .children()
        .map(|c| c.name())
        .filter(|n| *n == "conf" || n.starts_with("conf@"))
        .collect();
    names.sort_unstable();

    let mut table = BTreeMap::new();
    for name in names {
        let conf = resolve_one(configs_node, images, name, base)?;
        table.insert(name.to_string(), conf);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, len: usize) -> (String, Arc<Image>) {
        (
            name.to_string(),
            Arc::new(Image {
                name: name.to_string(),
                description: None,
                kind: "kernel".to_string(),
                arch: "arm64".to_string(),
                os: None,
                compression: "none".to_string(),
                data: vec![0xAA; len],
                hashes: Vec::new(),
            }),
        )
    }

    fn image_table(specs: &[(&str, usize)]) -> BTreeMap<String, Arc<Image>> {
        specs.iter().map(|&(name, len)| image(name, len)).collect()
    }

    #[test]
    fn test_default_name_required() {
        let configs = Node::new("configurations");
        let err = resolve_default_name(&configs).unwrap_err();
        assert!(matches!(err, FitError::Structural(ref what) if what == "default"));
    }

    #[test]
    fn test_sequential_load_addresses() {
        let images = image_table(&[("kernel@1", 4), ("fdt@1", 8)]);
        let configs = Node::new("configurations").with_child(
            Node::new("conf@1")
                .with_property("kernel", "kernel@1")
                .with_property("fdt", "fdt@1"),
        );

        let conf = resolve_one(&configs, &images, "conf@1", 0).unwrap();
        assert_eq!(conf.image_list.len(), 2);
        assert_eq!(conf.image_list[0].role, ImageRole::Kernel);
        assert_eq!(conf.image_list[0].load_address, 0);
        assert_eq!(conf.image_list[1].role, ImageRole::Fdt);
        assert_eq!(conf.image_list[1].load_address, 4);
    }

    #[test]
    fn test_explicit_base_offsets_cursor() {
        let images = image_table(&[("kernel@1", 16), ("fdt@1", 4), ("ramdisk@1", 2)]);
        let configs = Node::new("configurations").with_child(
            Node::new("conf@1")
                .with_property("kernel", "kernel@1")
                .with_property("fdt", "fdt@1")
                .with_property("ramdisk", "ramdisk@1"),
        );

        let conf = resolve_one(&configs, &images, "conf@1", 0x8000_0000).unwrap();
        let addrs: Vec<u64> = conf.image_list.iter().map(|l| l.load_address).collect();
        assert_eq!(addrs, vec![0x8000_0000, 0x8000_0010, 0x8000_0014]);
    }

    #[test]
    fn test_unknown_image_reference() {
        let images = image_table(&[("kernel@1", 4)]);
        let configs = Node::new("configurations").with_child(
            Node::new("conf@1")
                .with_property("kernel", "kernel@1")
                .with_property("fdt", "fdt@9"),
        );

        let err = resolve_one(&configs, &images, "conf@1", 0).unwrap_err();
        match err {
            FitError::UnknownImage {
                configuration,
                field,
                name,
            } => {
                assert_eq!(configuration, "conf@1");
                assert_eq!(field, "fdt");
                assert_eq!(name, "fdt@9");
            }
            other => panic!("expected UnknownImage, got {other}"),
        }
    }

    #[test]
    fn test_missing_configuration_is_structural() {
        let images = image_table(&[]);
        let configs = Node::new("configurations");
        let err = resolve_one(&configs, &images, "conf@7", 0).unwrap_err();
        assert!(matches!(err, FitError::Structural(ref what) if what == "configuration conf@7"));
    }

    #[test]
    fn test_resolve_all_skips_non_conf_children() {
        let images = image_table(&[("kernel@1", 4)]);
        let configs = Node::new("configurations")
            .with_property("default", "conf@1")
            .with_child(Node::new("conf@1").with_property("kernel", "kernel@1"))
            .with_child(Node::new("notes").with_property("kernel", "kernel@9"));

        let table = resolve_all(&configs, &images, 0).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("conf@1"));
    }

    #[test]
    fn test_shared_image_across_configurations() {
        let images = image_table(&[("kernel@1", 4)]);
        let configs = Node::new("configurations")
            .with_child(Node::new("conf@1").with_property("kernel", "kernel@1"))
            .with_child(Node::new("conf@2").with_property("kernel", "kernel@1"));

        let table = resolve_all(&configs, &images, 0).unwrap();
        assert!(Arc::ptr_eq(
            &table["conf@1"].image_list[0].image,
            &table["conf@2"].image_list[0].image,
        ));
    }
}
