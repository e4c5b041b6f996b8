use crate::bio::Record;

/// Keep the records whose high-confidence flag equals `target`
pub fn filter<'a, T, I>(records: I, target: bool) -> Vec<&'a T>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| record.high_confidence() == target)
        .collect()
}

/// Split into (matching `target`, not matching) in one pass, keeping input order
pub fn partition<'a, T, I>(records: I, target: bool) -> (Vec<&'a T>, Vec<&'a T>)
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .partition(|record| record.high_confidence() == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::Precursor;

    #[test]
    fn test_filter_by_flag() {
        let records = vec![
            Precursor::new("MI1", "a", "hsa", "acgu").with_high_confidence(true),
            Precursor::new("MI2", "b", "hsa", "acgu"),
            Precursor::new("MI3", "c", "hsa", "acgu").with_high_confidence(true),
        ];
        let high: Vec<&str> = filter(&records, true).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(high, vec!["MI1", "MI3"]);

        let (yes, no) = partition(&records, false);
        assert_eq!(yes.len(), 1);
        assert_eq!(no.len(), 2);
    }
}
