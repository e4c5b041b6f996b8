//! EMBL-style miRNA.dat records
use indexmap::IndexMap;
use nom::{
    bytes::complete::tag,
    character::complete::{digit1, space0},
    combinator::map_res,
    sequence::separated_pair,
    IResult,
};

use crate::bio::{Evidence, MatureOrigin, MatureSequence, Precursor};
use crate::{MirusError, Result};

#[derive(Debug, Clone, Default)]
pub struct DatRecords {
    pub precursors: Vec<Precursor>,
    /// One record per mature accession, origins merged across precursors
    pub matures: Vec<MatureSequence>,
}

#[derive(Debug, Default)]
struct Feature {
    span: (usize, usize),
    accession: Option<String>,
    product: Option<String>,
    evidence: Option<String>,
    experiment: Option<String>,
    // qualifier that a continuation line extends
    last: Option<&'static str>,
}

impl Feature {
    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "accession" => &mut self.accession,
            "product" => &mut self.product,
            "evidence" => &mut self.evidence,
            "experiment" => &mut self.experiment,
            _ => {
                self.last = None;
                return;
            }
        };
        *slot = Some(value);
        self.last = match key {
            "accession" => Some("accession"),
            "product" => Some("product"),
            "evidence" => Some("evidence"),
            _ => Some("experiment"),
        };
    }

    fn extend(&mut self, text: &str) {
        let slot = match self.last {
            Some("accession") => &mut self.accession,
            Some("product") => &mut self.product,
            Some("evidence") => &mut self.evidence,
            Some("experiment") => &mut self.experiment,
            _ => return,
        };
        if let Some(value) = slot {
            value.push(' ');
            value.push_str(text.trim_matches('"'));
        }
    }
}

#[derive(Debug, Default)]
struct Entry {
    name: String,
    accession: String,
    references: Vec<String>,
    features: Vec<Feature>,
    sequence: String,
}

fn parse_number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// Feature location such as `17..38`
fn parse_span(input: &str) -> IResult<&str, (usize, usize)> {
    let (input, _) = space0(input)?;
    separated_pair(parse_number, tag(".."), parse_number)(input)
}

pub fn parse(text: &str) -> Result<DatRecords> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;
    let mut in_sequence = false;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let err = |msg: &str| MirusError::Parse(format!("miRNA.dat line {}: {}", lineno + 1, msg));

        if line.starts_with("//") {
            let entry = current.take().ok_or_else(|| err("record terminator without ID line"))?;
            entries.push(entry);
            in_sequence = false;
            continue;
        }
        if in_sequence {
            if let Some(entry) = current.as_mut() {
                entry.sequence.extend(
                    line.chars()
                        .filter(|c| c.is_ascii_alphabetic())
                        .map(|c| c.to_ascii_lowercase()),
                );
            }
            continue;
        }

        let (code, rest) = match line.get(..2) {
            Some(code) => (code, line.get(2..).unwrap_or("").trim()),
            None => continue,
        };

        match code {
            "ID" => {
                if current.is_some() {
                    return Err(err("ID line inside an unterminated record"));
                }
                let name = rest
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| err("empty ID line"))?;
                current = Some(Entry {
                    name: name.to_string(),
                    ..Entry::default()
                });
            }
            "SQ" => in_sequence = true,
            _ => {
                let Some(entry) = current.as_mut() else {
                    continue;
                };
                match code {
                    "AC" => entry.accession = rest.trim_end_matches(';').trim().to_string(),
                    "RX" => {
                        if let Some(pmid) = rest.strip_prefix("PUBMED;") {
                            let pmid = pmid.trim().trim_end_matches('.').to_string();
                            if !pmid.is_empty() && !entry.references.contains(&pmid) {
                                entry.references.push(pmid);
                            }
                        }
                    }
                    "FT" => parse_feature_line(entry, rest).map_err(|msg| err(&msg))?,
                    _ => {}
                }
            }
        }
    }

    if current.is_some() {
        return Err(MirusError::Parse("miRNA.dat ends inside a record".to_string()));
    }

    Ok(assemble(entries))
}

fn parse_feature_line(entry: &mut Entry, rest: &str) -> std::result::Result<(), String> {
    if let Some(location) = rest.strip_prefix("miRNA") {
        let (_, span) = parse_span(location).map_err(|_| format!("bad feature location '{}'", location.trim()))?;
        entry.features.push(Feature {
            span,
            ..Feature::default()
        });
        return Ok(());
    }

    let Some(feature) = entry.features.last_mut() else {
        return Ok(());
    };
    if let Some(qualifier) = rest.strip_prefix('/') {
        let (key, value) = qualifier.split_once('=').unwrap_or((qualifier, ""));
        feature.set(key, value.trim().trim_matches('"').to_string());
    } else {
        feature.extend(rest);
    }
    Ok(())
}

fn assemble(entries: Vec<Entry>) -> DatRecords {
    let mut precursors = Vec::with_capacity(entries.len());
    let mut matures: IndexMap<String, MatureSequence> = IndexMap::new();

    for entry in entries {
        let organism = entry.name.split('-').next().unwrap_or_default().to_string();
        let mut precursor = Precursor::new(&entry.accession, &entry.name, organism, entry.sequence)
            .with_references(entry.references);

        for feature in entry.features {
            let Some(accession) = feature.accession else {
                tracing::warn!("Feature without accession on {}", precursor.id);
                continue;
            };
            let product = feature.product.unwrap_or_else(|| accession.clone());
            let Some(sequence) = precursor.subsequence(feature.span.0, feature.span.1) else {
                tracing::warn!(
                    "Feature {} span {}..{} outside precursor {}",
                    accession,
                    feature.span.0,
                    feature.span.1,
                    precursor.id
                );
                continue;
            };
            let origin = MatureOrigin {
                precursor_id: precursor.id.clone(),
                span: feature.span,
                evidence: feature
                    .evidence
                    .as_deref()
                    .map(|e| Evidence::parse(e, feature.experiment.as_deref()))
                    .unwrap_or(Evidence::Unknown),
            };
            let sequence = sequence.to_string();

            matures
                .entry(accession.clone())
                .or_insert_with(|| MatureSequence::new(accession.clone(), product, sequence))
                .origins
                .push(origin);
            if !precursor.matures.contains(&accession) {
                precursor.matures.push(accession);
            }
        }
        precursors.push(precursor);
    }

    DatRecords {
        precursors,
        matures: matures.into_values().collect(),
    }
}
