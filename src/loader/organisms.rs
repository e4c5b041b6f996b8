use crate::bio::Organism;
use crate::{MirusError, Result};

/// Parse organisms.txt: `code, division, name, tree, taxid`, tab separated.
/// Older releases stop after the tree column.
pub fn parse(text: &str) -> Result<Vec<Organism>> {
    let mut organisms = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(MirusError::Parse(format!(
                "organisms line {}: expected at least 4 columns, found {}",
                lineno + 1,
                fields.len()
            )));
        }

        let mut organism = Organism::new(fields[0], fields[2])
            .with_division(fields[1])
            .with_taxonomy(Organism::parse_tree(fields[3]));

        if let Some(taxid) = fields.get(4).filter(|s| !s.is_empty()) {
            let taxid = taxid.parse::<u32>().map_err(|_| {
                MirusError::Parse(format!(
                    "organisms line {}: bad taxonomy id '{}'",
                    lineno + 1,
                    taxid
                ))
            })?;
            organism = organism.with_taxid(taxid);
        }
        organisms.push(organism);
    }
    Ok(organisms)
}
