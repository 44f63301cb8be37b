use netgraph::algo::{self, PageRankConfig};
use netgraph::{load_records, raw_actor_count, GraphError, GraphStore, IngestError, InteractionRecord};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_csv_end_to_end() {
    let file = write_csv(
        "sender,receiver,weight\n\
         1,2,5\n\
         2,3,1\n\
         1,3,10\n\
         3,1,2\n\
         4,4,7\n\
         5,oops,1\n\
         2,6,0\n",
    );

    let report = load_records(file.path()).unwrap();
    assert_eq!(report.records.len(), 6);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].content, "5,oops,1");

    let mut store = GraphStore::new();
    let load = store.bulk_load(report.records.iter().copied());
    assert_eq!(load.inserted, 5);
    assert_eq!(load.self_loops, 1);

    // Raw actors: 1..=4 and 6; the self-loop actor 4 still counts
    assert_eq!(raw_actor_count(&report.records), 5);
    assert_eq!(report.actor_count(), 5);
    // Keyset: senders with a retained edge
    assert_eq!(store.node_count(), 3);

    // Zero weight from a bulk load is kept as-is
    assert_eq!(store.weight(2, 6), Some(0));

    let path = algo::shortest_path(&store, 1, 3).unwrap();
    assert_eq!(path.cost, 6);

    let ranks = algo::page_rank(&store, PageRankConfig::default());
    assert_eq!(ranks.scores.len(), 3);
}

#[test]
fn test_bulk_load_and_add_edge_disagree_on_weight() {
    let mut store = GraphStore::from_records(vec![InteractionRecord::new(1, 2, -5)]);
    assert_eq!(store.weight(1, 2), Some(-5));

    let err = store.add_edge(1, 3, -5).unwrap_err();
    assert_eq!(err, GraphError::NonPositiveWeight { from: 1, to: 3, weight: -5 });
    assert_eq!(store.weight(1, 3), None);
}

#[test]
fn test_missing_file() {
    let result = load_records("/definitely/not/here.csv");
    assert!(matches!(result, Err(IngestError::Io(_))));
}

#[test]
fn test_header_only_file() {
    let file = write_csv("sender,receiver,weight\n");
    let report = load_records(file.path()).unwrap();
    assert!(report.records.is_empty());
    assert!(report.skipped.is_empty());
}
