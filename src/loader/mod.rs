//! Building the entity set of one release from its flat files
pub mod dat;
pub mod fasta;
pub mod gff;
pub mod organisms;
pub mod structure;

use flate2::read::GzDecoder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::bio::{MatureSequence, Organism, Precursor};
use crate::{MirusError, Result};

pub const ORGANISMS_FILE: &str = "organisms.txt";
pub const DAT_FILE: &str = "miRNA.dat";
pub const STRUCTURE_FILE: &str = "miRNA.str";
pub const HAIRPIN_HIGH_CONF_FILE: &str = "hairpin_high_conf.fa";
pub const MATURE_HIGH_CONF_FILE: &str = "mature_high_conf.fa";
pub const GENOMES_DIR: &str = "genomes";

/// Which optional annotations a release actually defines.
///
/// A `false` here means the matching record fields carry the explicit
/// "absent" value, not a measured one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseCapabilities {
    pub high_confidence: bool,
    pub structures: bool,
    pub genomic_coordinates: bool,
    pub taxonomy_ids: bool,
}

/// Raw loader output, validated later by the entity store
#[derive(Debug, Clone, Default)]
pub struct ReleaseRecords {
    pub version: String,
    pub capabilities: ReleaseCapabilities,
    pub organisms: Vec<Organism>,
    pub precursors: Vec<Precursor>,
    pub matures: Vec<MatureSequence>,
}

pub trait ReleaseLoader: Send + Sync {
    fn load(&self) -> Result<ReleaseRecords>;
}

/// Reads a release directory laid out like the public miRBase FTP tree
#[derive(Debug, Clone)]
pub struct FlatFileLoader {
    dir: PathBuf,
    version: String,
}

impl FlatFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let version = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self { dir, version }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_gff(&self) -> Result<Option<Vec<gff::GffRow>>> {
        let genomes = self.dir.join(GENOMES_DIR);
        if !genomes.is_dir() {
            return Ok(None);
        }

        let mut paths = Vec::new();
        for pattern in ["*.gff3", "*.gff3.gz"] {
            let pattern = genomes.join(pattern);
            let entries = glob::glob(&pattern.to_string_lossy())
                .map_err(|e| MirusError::Config(format!("Bad genome file pattern: {}", e)))?;
            paths.extend(entries.filter_map(|entry| entry.ok()));
        }
        paths.sort();
        if paths.is_empty() {
            return Ok(None);
        }

        tracing::debug!(files = paths.len(), "Parsing genome annotations");
        let parsed: Vec<Vec<gff::GffRow>> = paths
            .par_iter()
            .map(|path| {
                let text = read_text(path)?;
                gff::parse(&text).map_err(|e| {
                    MirusError::Parse(format!("{}: {}", path.display(), e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(Some(parsed.into_iter().flatten().collect()))
    }
}

impl ReleaseLoader for FlatFileLoader {
    fn load(&self) -> Result<ReleaseRecords> {
        tracing::info!("Loading release {} from {}", self.version, self.dir.display());

        let organisms_text = find_release_file(&self.dir, ORGANISMS_FILE)
            .ok_or_else(|| missing_file(&self.dir, ORGANISMS_FILE))
            .and_then(|path| read_text(&path))?;
        let organisms = organisms::parse(&organisms_text)?;

        let dat_text = find_release_file(&self.dir, DAT_FILE)
            .ok_or_else(|| missing_file(&self.dir, DAT_FILE))
            .and_then(|path| read_text(&path))?;
        let dat::DatRecords {
            mut precursors,
            mut matures,
        } = dat::parse(&dat_text)?;

        let mut capabilities = ReleaseCapabilities {
            taxonomy_ids: organisms.iter().any(|o| o.taxid.is_some()),
            ..ReleaseCapabilities::default()
        };

        if let Some(text) = read_optional(&self.dir, STRUCTURE_FILE)? {
            let drawings = structure::parse(&text)?;
            for precursor in &mut precursors {
                precursor.structure = drawings.get(&precursor.name).cloned();
            }
            capabilities.structures = true;
        }

        if let Some(text) = read_optional(&self.dir, HAIRPIN_HIGH_CONF_FILE)? {
            let hairpins = fasta::accessions(&text)?;
            let mature_ids = read_optional(&self.dir, MATURE_HIGH_CONF_FILE)?
                .map(|text| fasta::accessions(&text))
                .transpose()?;
            apply_high_confidence(&mut precursors, &mut matures, &hairpins, mature_ids.as_ref());
            capabilities.high_confidence = true;
        }

        if let Some(rows) = self.load_gff()? {
            apply_placements(&mut precursors, &mut matures, rows);
            capabilities.genomic_coordinates = true;
        }

        tracing::info!(
            organisms = organisms.len(),
            precursors = precursors.len(),
            matures = matures.len(),
            "Release {} parsed",
            self.version
        );

        Ok(ReleaseRecords {
            version: self.version.clone(),
            capabilities,
            organisms,
            precursors,
            matures,
        })
    }
}

fn apply_high_confidence(
    precursors: &mut [Precursor],
    matures: &mut [MatureSequence],
    hairpins: &HashSet<String>,
    mature_ids: Option<&HashSet<String>>,
) {
    for precursor in precursors.iter_mut() {
        precursor.high_confidence = hairpins.contains(&precursor.id);
    }
    for mature in matures.iter_mut() {
        mature.high_confidence = match mature_ids {
            Some(ids) => ids.contains(&mature.id),
            None => mature
                .origins
                .iter()
                .any(|origin| hairpins.contains(&origin.precursor_id)),
        };
    }
}

fn apply_placements(precursors: &mut [Precursor], matures: &mut [MatureSequence], rows: Vec<gff::GffRow>) {
    let precursor_pos: HashMap<String, usize> = precursors
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();
    let mature_pos: HashMap<String, usize> = matures
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id.clone(), i))
        .collect();

    let mut skipped = 0usize;
    for row in rows {
        match row {
            gff::GffRow::Precursor { accession, locus } => match precursor_pos.get(&accession) {
                Some(&i) => {
                    if !precursors[i].placements.contains(&locus) {
                        precursors[i].placements.push(locus);
                    }
                }
                None => {
                    tracing::warn!("Skipping locus for unknown precursor {}", accession);
                    skipped += 1;
                }
            },
            gff::GffRow::Mature {
                accession,
                derives_from,
                locus,
            } => match (mature_pos.get(&accession), precursor_pos.contains_key(&derives_from)) {
                (Some(&i), true) => {
                    let mature = &mut matures[i];
                    if !mature
                        .placements
                        .iter()
                        .any(|p| p.precursor_id == derives_from && p.locus == locus)
                    {
                        mature.placements.push(crate::bio::MaturePlacement {
                            precursor_id: derives_from,
                            locus,
                        });
                    }
                }
                _ => {
                    tracing::warn!(
                        "Skipping locus for mature {} derived from {}",
                        accession,
                        derives_from
                    );
                    skipped += 1;
                }
            },
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "Genome annotation rows did not match any record");
    }
}

fn missing_file(dir: &Path, name: &str) -> MirusError {
    MirusError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} missing from release directory {}", name, dir.display()),
    ))
}

/// `name` or `name.gz` inside `dir`, plain file preferred
pub fn find_release_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Some(plain);
    }
    let gz = dir.join(format!("{}.gz", name));
    gz.is_file().then_some(gz)
}

fn read_optional(dir: &Path, name: &str) -> Result<Option<String>> {
    find_release_file(dir, name).map(|path| read_text(&path)).transpose()
}

/// Read a whole release file, transparently inflating `.gz`
pub fn read_text(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut buffer = Vec::new();
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        GzDecoder::new(BufReader::new(file)).read_to_end(&mut buffer)?;
    } else {
        BufReader::new(file).read_to_end(&mut buffer)?;
    }
    // release files predate UTF-8 in places; latin-1 bytes survive as U+FFFD
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_plain_and_gz() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("organisms.txt"), "hsa\tHSA\tHomo sapiens\tMetazoa;\t9606\n").unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"compressed").unwrap();
        std::fs::write(dir.path().join("miRNA.str.gz"), encoder.finish().unwrap()).unwrap();

        let plain = find_release_file(dir.path(), ORGANISMS_FILE).unwrap();
        assert!(read_text(&plain).unwrap().starts_with("hsa"));

        let gz = find_release_file(dir.path(), STRUCTURE_FILE).unwrap();
        assert_eq!(read_text(&gz).unwrap(), "compressed");

        assert!(find_release_file(dir.path(), DAT_FILE).is_none());
    }

    #[test]
    fn test_missing_required_file() {
        let dir = TempDir::new().unwrap();
        let err = FlatFileLoader::new(dir.path()).load().unwrap_err();
        match err {
            MirusError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
                assert!(e.to_string().contains(ORGANISMS_FILE));
            }
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[test]
    fn test_mature_confidence_falls_back_to_precursors() {
        let mut precursors = vec![
            Precursor::new("MI1", "hsa-mir-1", "hsa", "acgu"),
            Precursor::new("MI2", "hsa-mir-2", "hsa", "acgu"),
        ];
        let mut matures = vec![
            MatureSequence::new("MIMAT1", "hsa-miR-1", "ac").with_origin("MI1", (1, 2)),
            MatureSequence::new("MIMAT2", "hsa-miR-2", "ac").with_origin("MI2", (1, 2)),
        ];
        let hairpins: HashSet<String> = ["MI1".to_string()].into_iter().collect();
        apply_high_confidence(&mut precursors, &mut matures, &hairpins, None);
        assert!(precursors[0].high_confidence);
        assert!(!precursors[1].high_confidence);
        assert!(matures[0].high_confidence);
        assert!(!matures[1].high_confidence);
    }
}
