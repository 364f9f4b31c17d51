//! Basic usage example for the Remap library.
//!
//! This example demonstrates the high-level API for rewriting image
//! references according to an override configuration.
//!
//! Run with: cargo run --example basic_usage

use libremap::{ConfigReader, Remap};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Remap Library - Basic Usage Example\n");

    // Overrides usually come from a file on disk; a YAML string keeps the
    // example self-contained.
    let reader = ConfigReader::from_yaml_str(
        r"
images:
  all:
    repository: myregistry.io/mirrors
  cert-manager:
    tag: v1.14.4
",
    )?;
    let remap = Remap::new(reader);
    println!("✓ Loaded override configuration\n");

    let manifests = [
        ("cert-manager", "quay.io/jetstack/cert-manager-controller:v1.5.3"),
        ("cluster-api", "gcr.io/k8s-staging/cluster-api-controller:v1.7.0"),
        ("cluster-api", "nginx:1.21"),
    ];

    for (component, image) in manifests {
        match remap.alter_image(component, image) {
            Ok(rewritten) => {
                println!("  [{}]", component);
                println!("    {} ->", image);
                println!("    {}\n", rewritten);
            }
            Err(e) => println!("✗ Failed to rewrite '{}': {}\n", image, e),
        }
    }

    println!("Example completed!");
    Ok(())
}
