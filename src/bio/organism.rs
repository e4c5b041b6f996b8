use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    /// Three-letter code used as the precursor name prefix (e.g. "hsa")
    pub code: String,
    pub division: String,
    /// Full latin name
    pub name: String,
    /// Ranks from the top-level clade down to the organism's position
    pub taxonomy: Vec<String>,
    /// NCBI taxonomy identifier; legacy releases may not carry one
    pub taxid: Option<u32>,
}

impl Organism {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            division: String::new(),
            name: name.into(),
            taxonomy: Vec::new(),
            taxid: None,
        }
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = division.into();
        self
    }

    pub fn with_taxonomy<I, S>(mut self, ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taxonomy = ranks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_taxid(mut self, taxid: u32) -> Self {
        self.taxid = Some(taxid);
        self
    }

    /// Split a `;`-separated tree column, ignoring the trailing separator
    pub fn parse_tree(tree: &str) -> Vec<String> {
        tree.trim()
            .trim_end_matches(';')
            .split(';')
            .map(str::trim)
            .filter(|rank| !rank.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_rank(&self, rank: &str) -> bool {
        self.taxonomy.iter().any(|r| r == rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let ranks = Organism::parse_tree("Metazoa;Bilateria;Deuterostoma;Chordata;Vertebrata;Mammalia;Primates;Hominidae;");
        assert_eq!(ranks.len(), 8);
        assert_eq!(ranks.first().map(String::as_str), Some("Metazoa"));
        assert_eq!(ranks.last().map(String::as_str), Some("Hominidae"));
        assert!(Organism::parse_tree("").is_empty());
    }

    #[test]
    fn test_taxid_is_optional() {
        let org = Organism::new("hsa", "Homo sapiens").with_taxid(9606);
        assert_eq!(org.taxid, Some(9606));
        assert_eq!(Organism::new("ath", "Arabidopsis thaliana").taxid, None);
    }
}
