//! Genome coordinate files (genomes/<org>.gff3)
use crate::bio::{GenomicPlacement, Strand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GffRow {
    Precursor {
        accession: String,
        locus: GenomicPlacement,
    },
    Mature {
        accession: String,
        derives_from: String,
        locus: GenomicPlacement,
    },
}

/// Drop the `_N` suffix newer releases append to repeated loci
pub fn strip_locus_suffix(accession: &str) -> &str {
    match accession.rsplit_once('_') {
        Some((base, suffix)) if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) => base,
        _ => accession,
    }
}

fn attribute<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == key).then_some(v.trim())
    })
}

/// Rows other than miRNA_primary_transcript/miRNA are ignored
pub fn parse(text: &str) -> Result<Vec<GffRow>, String> {
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            return Err(format!("line {}: expected 9 columns, found {}", lineno + 1, fields.len()));
        }

        let kind = fields[2];
        if kind != "miRNA_primary_transcript" && kind != "miRNA" {
            continue;
        }

        let start: u64 = fields[3]
            .parse()
            .map_err(|_| format!("line {}: bad start '{}'", lineno + 1, fields[3]))?;
        let end: u64 = fields[4]
            .parse()
            .map_err(|_| format!("line {}: bad end '{}'", lineno + 1, fields[4]))?;
        let strand = Strand::from_symbol(fields[6])
            .ok_or_else(|| format!("line {}: bad strand '{}'", lineno + 1, fields[6]))?;
        let locus = GenomicPlacement::new(fields[0], strand, start, end);

        let attributes = fields[8];
        let Some(accession) = attribute(attributes, "Alias").or_else(|| attribute(attributes, "ID")) else {
            return Err(format!("line {}: row has neither Alias nor ID", lineno + 1));
        };
        let accession = strip_locus_suffix(accession).to_string();

        if kind == "miRNA" {
            let derives_from = attribute(attributes, "Derives_from")
                .map(strip_locus_suffix)
                .ok_or_else(|| format!("line {}: mature row without Derives_from", lineno + 1))?
                .to_string();
            rows.push(GffRow::Mature {
                accession,
                derives_from,
                locus,
            });
        } else {
            rows.push(GffRow::Precursor { accession, locus });
        }
    }
    Ok(rows)
}
