//! Common test utilities for mirus tests
//!
//! Provides the flat-file fixture release and a small in-memory release for
//! tests that do not need the loader.
#![allow(dead_code)]

use mirus::bio::{GenomicPlacement, MatureSequence, Organism, Precursor, Strand};
use mirus::loader::{FlatFileLoader, ReleaseCapabilities, ReleaseRecords};
use mirus::Release;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Precursor accessions of the fixture release, in identifier order
pub const FIXTURE_PRECURSORS: [&str; 9] = [
    "MI0000001",
    "MI0000060",
    "MI0000061",
    "MI0000062",
    "MI0000063",
    "MI0000077",
    "MI0000180",
    "MI0000550",
    "MI0007316",
];

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("release")
}

pub fn fixture_loader() -> FlatFileLoader {
    FlatFileLoader::new(fixture_dir()).with_version("fixture")
}

pub fn load_fixture() -> Release {
    Release::load(&fixture_loader()).expect("fixture release should load")
}

/// Copy the fixture release into `<tmp>/<version>/` so tests can alter it
pub fn copy_fixture(version: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join(version);
    copy_dir(&fixture_dir(), &target);
    (temp, target)
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).expect("Failed to create fixture copy");
    for entry in std::fs::read_dir(from).expect("Failed to read fixture dir") {
        let entry = entry.expect("Failed to read fixture entry");
        let path = entry.path();
        let dest = to.join(entry.file_name());
        if path.is_dir() {
            copy_dir(&path, &dest);
        } else {
            std::fs::copy(&path, &dest).expect("Failed to copy fixture file");
        }
    }
}

pub fn ids<T: mirus::bio::Record>(records: &[&T]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

/// A chain of precursors on one chromosome, `gap` bases apart, alternating
/// high-confidence flags
pub fn chain_records(count: usize, gap: u64) -> ReleaseRecords {
    let precursors: Vec<Precursor> = (0..count)
        .map(|i| {
            let start = 1 + i as u64 * gap;
            Precursor::new(
                format!("MI{:07}", i + 1),
                format!("tst-mir-{}", i + 1),
                "tst",
                "acguacguacguacguacgu",
            )
            .with_placement(GenomicPlacement::new("chr1", Strand::Forward, start, start + 79))
            .with_matures([format!("MIMAT{:07}", i + 1)])
            .with_high_confidence(i % 2 == 0)
        })
        .collect();

    let matures = (0..count)
        .map(|i| {
            MatureSequence::new(format!("MIMAT{:07}", i + 1), format!("tst-miR-{}-5p", i + 1), "cguacg")
                .with_origin(format!("MI{:07}", i + 1), (2, 7))
                .with_high_confidence(i % 3 == 0)
        })
        .collect();

    ReleaseRecords {
        version: "synthetic".to_string(),
        capabilities: ReleaseCapabilities {
            high_confidence: true,
            genomic_coordinates: true,
            ..ReleaseCapabilities::default()
        },
        organisms: vec![Organism::new("tst", "Testus testus").with_taxonomy(["Metazoa", "Testia"])],
        precursors,
        matures,
    }
}
