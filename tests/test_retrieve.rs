use docstack::domain::entities::document::DocumentInput;
use docstack::infrastructure::embeddings::noop::NoopProvider;
use docstack::Docstack;
use std::sync::Arc;

fn setup() -> Docstack {
    Docstack::with_providers(":memory:", "default", Arc::new(NoopProvider)).unwrap()
}

#[tokio::test]
async fn test_keyword_search_returns_matches() {
    let ds = setup();
    ds.ingest(vec![
        DocumentInput::new("the quick brown fox jumps over the lazy dog"),
        DocumentInput::new("rust ownership and borrowing explained"),
    ])
    .await
    .unwrap();

    let docs = ds.retrieve("fox", 10).unwrap();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].content.contains("fox"));
}

#[tokio::test]
async fn test_search_empty_results() {
    let ds = setup();
    let docs = ds.retrieve("nonexistent", 10).unwrap();
    assert!(docs.is_empty());

    let ranking = ds.search_with_ranking("nonexistent", 10).unwrap();
    assert!(ranking.is_empty());
}

#[tokio::test]
async fn test_query_with_no_tokens_is_empty() {
    let ds = setup();
    ds.ingest(vec![DocumentInput::new("some content")])
        .await
        .unwrap();
    assert!(ds.retrieve("...", 10).unwrap().is_empty());
    assert!(ds.retrieve("", 10).unwrap().is_empty());
}

#[tokio::test]
async fn test_limit_caps_results() {
    let ds = setup();
    let inputs: Vec<DocumentInput> = (0..5)
        .map(|i| DocumentInput::new(format!("shared keyword document number {i}")))
        .collect();
    ds.ingest(inputs).await.unwrap();

    assert_eq!(ds.retrieve("keyword", 3).unwrap().len(), 3);
    assert_eq!(ds.retrieve("keyword", 10).unwrap().len(), 5);
}

#[tokio::test]
async fn test_results_ordered_by_relevance() {
    let ds = setup();
    ds.ingest(vec![
        DocumentInput::new("salmon mentioned once in a fairly long sentence about rivers and bears"),
        DocumentInput::new("salmon salmon salmon"),
    ])
    .await
    .unwrap();

    let scored = ds.search_with_score("salmon", 10).unwrap();
    assert_eq!(scored.len(), 2);
    assert!(scored[0].1 >= scored[1].1);

    let docs = ds.retrieve("salmon", 10).unwrap();
    assert_eq!(docs[0].content, "salmon salmon salmon");
}

#[tokio::test]
async fn test_ranking_is_order_preserving() {
    let ds = setup();
    ds.ingest(vec![
        DocumentInput::new("whale"),
        DocumentInput::new("whale watching trips depart daily from the harbor in summer"),
        DocumentInput::new("unrelated"),
    ])
    .await
    .unwrap();

    let scored = ds.search_with_score("whale", 10).unwrap();
    let ranking = ds.search_with_ranking("whale", 10).unwrap();
    assert_eq!(scored.len(), ranking.len());
    for (i, ((sid, _), (rid, _))) in scored.iter().zip(ranking.iter()).enumerate() {
        assert_eq!(sid, rid, "id order changed at position {i}");
    }
    for pair in ranking.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
    assert_eq!(ranking[0].1, 1);
}

#[tokio::test]
async fn test_tied_scores_share_a_rank() {
    let ds = setup();
    ds.ingest(vec![
        DocumentInput::new("identical heron content"),
        DocumentInput::new("identical heron content"),
    ])
    .await
    .unwrap();

    let ranking = ds.search_with_ranking("heron", 10).unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].1, ranking[1].1);
}

#[tokio::test]
async fn test_all_query_terms_must_match() {
    let ds = setup();
    ds.ingest(vec![
        DocumentInput::new("apples and oranges"),
        DocumentInput::new("apples only here"),
    ])
    .await
    .unwrap();

    let docs = ds.retrieve("apples oranges", 10).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "apples and oranges");
}
