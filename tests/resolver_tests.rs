mod common;

use common::{ids, load_fixture, FIXTURE_PRECURSORS};
use mirus::bio::Strand;
use mirus::query::GenomicFilter;
use mirus::{MirusError, QueryCriteria, QueryOutcome, SearchCategory};
use pretty_assertions::assert_eq;

#[test]
fn test_empty_criteria_returns_every_precursor() {
    let release = load_fixture();
    let outcome = release.precursors(&QueryCriteria::new()).unwrap();
    let records = outcome.unified().unwrap();
    assert_eq!(ids(records), FIXTURE_PRECURSORS.to_vec());
}

#[test]
fn test_unknown_ids_are_ignored() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_ids(["MI0007316", "MI9999999"]);
    let outcome = release.precursors(&criteria).unwrap();
    assert!(!outcome.is_partitioned());
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0007316"]);
}

#[test]
fn test_names_resolve_to_accessions() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_names(["hsa-let-7a-2", "hsa-mir-21"]);
    let outcome = release.precursors(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000061", "MI0000077"]);
}

#[test]
fn test_contradiction_partitions_by_category() {
    let release = load_fixture();
    let criteria = QueryCriteria::new()
        .with_organism("Homo sapiens")
        .with_ids(["MI0007316"]);
    let outcome = release.precursors(&criteria).unwrap();

    assert!(outcome.is_partitioned());
    let QueryOutcome::Partitioned(buckets) = &outcome else {
        panic!("expected a partitioned outcome");
    };
    let categories: Vec<SearchCategory> = buckets.keys().copied().collect();
    assert_eq!(categories, vec![SearchCategory::Identifier, SearchCategory::Organism]);

    assert_eq!(
        ids(outcome.partition(SearchCategory::Identifier).unwrap()),
        vec!["MI0007316"]
    );
    assert_eq!(
        ids(outcome.partition(SearchCategory::Organism).unwrap()),
        vec!["MI0000060", "MI0000061", "MI0000062", "MI0000063", "MI0000077"]
    );
}

/// Buckets of a partitioned outcome as (category, accessions), in output order
fn bucket_ids(outcome: &QueryOutcome<&mirus::bio::Precursor>) -> Vec<(SearchCategory, Vec<String>)> {
    let QueryOutcome::Partitioned(buckets) = outcome else {
        panic!("expected a partitioned outcome");
    };
    buckets
        .iter()
        .map(|(category, records)| (*category, ids(records)))
        .collect()
}

#[test]
fn test_three_identity_categories_without_common_record() {
    let release = load_fixture();
    // each pair shares one precursor, no precursor is in all three
    let criteria = QueryCriteria::new()
        .with_ids(["MI0000060", "MI0000550"])
        .with_names(["mmu-let-7a-1", "hsa-let-7d"])
        .with_organism("hsa");

    let outcome = release.precursors(&criteria).unwrap();
    let by_id = (SearchCategory::Identifier, vec!["MI0000060".to_string(), "MI0000550".to_string()]);
    let by_name = (SearchCategory::Name, vec!["MI0000062".to_string(), "MI0000550".to_string()]);
    let by_organism = (
        SearchCategory::Organism,
        ["MI0000060", "MI0000061", "MI0000062", "MI0000063", "MI0000077"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
    );
    assert_eq!(
        bucket_ids(&outcome),
        vec![by_id.clone(), by_name.clone(), by_organism.clone()]
    );

    let outcome = release
        .precursors(&criteria.with_genomic(GenomicFilter::on("chr9")))
        .unwrap();
    let by_locus = (
        SearchCategory::Genomic,
        vec!["MI0000060".to_string(), "MI0000062".to_string(), "MI0000063".to_string()],
    );
    assert_eq!(bucket_ids(&outcome), vec![by_id, by_name, by_organism, by_locus]);

    let json = serde_json::to_value(outcome.map(|p| p.id.as_str())).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    assert!(keys.contains(&"name-search"));
}

#[test]
fn test_partition_serializes_with_category_tags() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_organism("hsa").with_ids(["MI0007316"]);
    let outcome = release.precursors(&criteria).unwrap().map(|p| p.id.as_str());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["id-search"], serde_json::json!(["MI0007316"]));
    assert_eq!(json["organism-search"].as_array().unwrap().len(), 5);
}

#[test]
fn test_rank_selects_organisms_below_it() {
    let release = load_fixture();
    let outcome = release
        .precursors(&QueryCriteria::new().with_rank("Mammalia"))
        .unwrap();
    assert_eq!(
        ids(outcome.unified().unwrap()),
        vec![
            "MI0000060",
            "MI0000061",
            "MI0000062",
            "MI0000063",
            "MI0000077",
            "MI0000550",
            "MI0007316"
        ]
    );
}

#[test]
fn test_rank_and_organism_intersect() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_rank("Mammalia").with_organism("mmu");
    let outcome = release.precursors(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000550", "MI0007316"]);
}

#[test]
fn test_genomic_chromosome_only() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_genomic(GenomicFilter::on("chr9"));
    let outcome = release.precursors(&criteria).unwrap();
    // forward strand bucket first, then reverse, each by start
    assert_eq!(
        ids(outcome.unified().unwrap()),
        vec!["MI0000060", "MI0000062", "MI0000063"]
    );
}

#[test]
fn test_genomic_strand_and_start() {
    let release = load_fixture();
    let filter = GenomicFilter::on("chr9")
        .with_strand(Strand::Forward)
        .with_start(2000);
    let outcome = release
        .precursors(&QueryCriteria::new().with_genomic(filter))
        .unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000062"]);
}

#[test]
fn test_genomic_range_requires_containment() {
    let release = load_fixture();
    // MI0000060 spans 1000-1079 and pokes out of this range
    let filter = GenomicFilter::on("chr9").with_start(1010).with_end(3000);
    let outcome = release
        .precursors(&QueryCriteria::new().with_genomic(filter))
        .unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000062", "MI0000063"]);
}

#[test]
fn test_unknown_chromosome_is_empty_not_partitioned() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_genomic(GenomicFilter::on("chrX"));
    let outcome = release.precursors(&criteria).unwrap();
    assert!(!outcome.is_partitioned());
    assert!(outcome.is_empty());
}

#[test]
fn test_organism_and_genomic_contradiction() {
    let release = load_fixture();
    let criteria = QueryCriteria::new()
        .with_organism("hsa")
        .with_genomic(GenomicFilter::on("chr13"));
    let outcome = release.precursors(&criteria).unwrap();

    assert!(outcome.is_partitioned());
    assert_eq!(
        ids(outcome.partition(SearchCategory::Organism).unwrap()),
        vec!["MI0000060", "MI0000061", "MI0000062", "MI0000063", "MI0000077"]
    );
    assert_eq!(
        ids(outcome.partition(SearchCategory::Genomic).unwrap()),
        vec!["MI0000550", "MI0007316"]
    );
}

#[test]
fn test_organism_and_genomic_agree() {
    let release = load_fixture();
    let criteria = QueryCriteria::new()
        .with_organism("Mus musculus")
        .with_genomic(GenomicFilter::on("chr13").with_end(2000));
    let outcome = release.precursors(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000550"]);
}

#[test]
fn test_precursors_related_to_mature() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_related(["MIMAT0000062"]);
    let outcome = release.precursors(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000060", "MI0000061"]);
}

#[test]
fn test_matures_related_to_precursor() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_related(["MI0000060"]);
    let outcome = release.matures(&criteria).unwrap();
    assert_eq!(
        ids(outcome.unified().unwrap()),
        vec!["MIMAT0000062", "MIMAT0004481"]
    );
}

#[test]
fn test_matures_by_organism() {
    let release = load_fixture();
    let outcome = release
        .matures(&QueryCriteria::new().with_organism("mmu"))
        .unwrap();
    assert_eq!(
        ids(outcome.unified().unwrap()),
        vec!["MIMAT0000521", "MIMAT0004620"]
    );
}

#[test]
fn test_matures_by_genomic_locus() {
    let release = load_fixture();
    let criteria = QueryCriteria::new().with_genomic(GenomicFilter::on("chr11"));
    let outcome = release.matures(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MIMAT0000062"]);
}

#[test]
fn test_high_confidence_filter_on_outcome() {
    let release = load_fixture();
    let outcome = release
        .precursors(&QueryCriteria::new().with_organism("hsa"))
        .unwrap()
        .high_confidence(true);
    assert_eq!(
        ids(outcome.unified().unwrap()),
        vec!["MI0000060", "MI0000062", "MI0000077"]
    );
}

#[test]
fn test_invalid_genomic_range_is_rejected() {
    let release = load_fixture();
    let filter = GenomicFilter::on("chr9").with_start(500).with_end(100);
    let err = release
        .precursors(&QueryCriteria::new().with_genomic(filter))
        .unwrap_err();
    assert!(matches!(err, MirusError::InvalidInput(_)));
}

#[test]
fn test_criteria_from_json() {
    let release = load_fixture();
    let criteria: QueryCriteria = serde_json::from_str(
        r#"{"organisms": ["hsa"], "genomic": {"chromosome": "chr17"}}"#,
    )
    .unwrap();
    let outcome = release.precursors(&criteria).unwrap();
    assert_eq!(ids(outcome.unified().unwrap()), vec!["MI0000077"]);
}
