//! High-confidence FASTA files; only the headers matter
use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::space1,
    combinator::opt,
    sequence::preceded,
    IResult,
};
use std::collections::HashSet;

use crate::{MirusError, Result};

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// `>name accession description...` -> (name, accession)
fn parse_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = tag(">")(input)?;
    let (input, name) = take_till1(is_separator)(input)?;
    let (input, accession) = opt(preceded(space1, take_till1(is_separator)))(input)?;
    Ok((input, (name, accession)))
}

/// Accessions named in the header lines of a FASTA file
pub fn accessions(text: &str) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if !line.starts_with('>') {
            continue;
        }
        let (_, (name, accession)) = parse_header(line)
            .map_err(|_| MirusError::Parse(format!("FASTA line {}: malformed header", lineno + 1)))?;
        let accession = accession.ok_or_else(|| {
            MirusError::Parse(format!("FASTA line {}: header for {} lacks an accession", lineno + 1, name))
        })?;
        ids.insert(accession.to_string());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tokens() {
        let (_, (name, accession)) = parse_header(">hsa-let-7a-1 MI0000060 Homo sapiens let-7a-1 stem-loop").unwrap();
        assert_eq!(name, "hsa-let-7a-1");
        assert_eq!(accession, Some("MI0000060"));
        assert!(parse_header("hsa-let-7a-1").is_err());
    }

    #[test]
    fn test_accessions() {
        let text = ">hsa-let-7a-1 MI0000060 Homo sapiens let-7a-1 stem-loop\n\
                    UGGGAUGAGGUAGUAGGUUGUAUAGUUUUAGGGUCACACCCACCACUGGGAGAUAACUAUACAAUCUACUGUCUUUCCUA\n\
                    >hsa-mir-21 MI0000077 Homo sapiens miR-21 stem-loop\n\
                    UGUCGGGUAGCUUAUCAGACUGAUGUUGACUGUUGAAUCUCAUGGCAACACCAGUCGAUGGGCUGUC\n";
        let ids = accessions(text).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("MI0000077"));
    }

    #[test]
    fn test_header_without_accession() {
        assert!(matches!(accessions(">hsa-mir-21\nACGU\n"), Err(MirusError::Parse(_))));
    }
}
