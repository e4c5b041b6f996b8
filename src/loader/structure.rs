//! miRNA.str hairpin drawings, converted to dot-bracket notation
use std::collections::HashMap;

use crate::{MirusError, Result};

/// Convert one five-line drawing.
///
/// Lines 1 and 2 hold the 5' strand (unpaired and paired rows), line 3 the
/// pairing bars plus the apex of the loop, lines 4 and 5 the 3' strand read
/// right to left (paired and unpaired rows).
pub fn dot_bracket(lines: &[&str; 5]) -> String {
    let rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let at = |row: usize, col: usize| rows[row].get(col).copied().unwrap_or(' ');
    let paired = |col: usize| at(2, col) == '|';

    let mut top = String::new();
    let mut bottom = String::new();
    for col in 0..width {
        if at(0, col).is_ascii_alphabetic() {
            top.push('.');
        }
        if at(1, col).is_ascii_alphabetic() {
            top.push(if paired(col) { '(' } else { '.' });
        }
        if at(2, col).is_ascii_alphabetic() {
            top.push('.');
        }
        if at(3, col).is_ascii_alphabetic() {
            bottom.push(if paired(col) { ')' } else { '.' });
        }
        if at(4, col).is_ascii_alphabetic() {
            bottom.push('.');
        }
    }
    top.extend(bottom.chars().rev());
    top
}

/// Precursor name -> dot-bracket structure
pub fn parse(text: &str) -> Result<HashMap<String, String>> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut structures = HashMap::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;
        let Some(header) = line.strip_prefix('>') else {
            continue;
        };
        let name = header
            .split_whitespace()
            .next()
            .ok_or_else(|| MirusError::Parse(format!("miRNA.str line {}: empty header", i)))?;

        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i + 5 > lines.len() {
            return Err(MirusError::Parse(format!(
                "miRNA.str: drawing for {} is truncated",
                name
            )));
        }
        let drawing = [lines[i], lines[i + 1], lines[i + 2], lines[i + 3], lines[i + 4]];
        i += 5;

        structures.insert(name.to_string(), dot_bracket(&drawing));
    }

    tracing::debug!(structures = structures.len(), "Hairpin drawings converted");
    Ok(structures)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
>cel-let-7 (-42.90)   [cel-let-7-5p:17-38] [cel-let-7-3p:60-81]

   ua  ug   a     c
     ca  agg ucgag g
     ||  ||| |||||
     gu  ucc aguuc u
   ca  -a   g     u

";

    #[test]
    fn test_dot_bracket_balanced() {
        let structures = parse(SAMPLE).unwrap();
        let db = structures.get("cel-let-7").unwrap();

        let opens = db.chars().filter(|&c| c == '(').count();
        let closes = db.chars().filter(|&c| c == ')').count();
        assert_eq!(opens, 10);
        assert_eq!(opens, closes);
        assert_eq!(db.len(), 33);
        assert_eq!(db, "..((..(((.(((((....))))).))).))..");
    }

    #[test]
    fn test_truncated_drawing() {
        let text = ">hsa-mir-1 (-1.0)\n\n  a\n  u\n";
        assert!(matches!(parse(text), Err(MirusError::Parse(_))));
    }
}
