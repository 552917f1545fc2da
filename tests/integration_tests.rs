//! Integration tests for the chunk ranker

use resume_chunk_ranker::config::{ChunkingConfig, ScoringWeights};
use resume_chunk_ranker::input::InputManager;
use resume_chunk_ranker::processing::sections::SectionLabel;
use resume_chunk_ranker::{select_relevant_chunks, ChunkRanker, RankerError};
use std::path::Path;

fn ranker(min_chars: usize, max_chars: usize, max_selected: usize) -> ChunkRanker {
    ChunkRanker::new(
        ChunkingConfig::new(min_chars, max_chars, max_selected),
        ScoringWeights::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_text_resume_selection() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let requirements = manager
        .load_requirements(Path::new("tests/fixtures/requirements.json"))
        .await
        .unwrap();
    let index = requirements.keyword_index().unwrap();

    let result = ranker(40, 300, 3).rank(&text, &index).unwrap();

    assert_eq!(result.total_chunks, 7);
    assert_eq!(result.selected_count, 3);

    let sections: Vec<SectionLabel> = result.chunks.iter().map(|c| c.chunk.source_section).collect();
    assert_eq!(
        sections,
        vec![SectionLabel::Header, SectionLabel::Experience, SectionLabel::Skills]
    );
    assert!(result.chunks[0].chunk.text.starts_with("John Doe"));
    assert!(result.chunks[1].chunk.text.contains("Acme Corp"));

    let terms: Vec<&str> = result.matched_terms.iter().map(String::as_str).collect();
    assert_eq!(
        terms,
        vec![
            "aws",
            "billing",
            "built",
            "docker",
            "led",
            "machine learning",
            "microservices",
            "node.js",
            "postgresql"
        ]
    );

    // Experience: three must-have skills, two verbs, two ATS keywords and the section bonus.
    assert_eq!(result.chunks[1].score, 11.0);
    // Skills: three must-have and two nice-to-have skills.
    assert_eq!(result.chunks[2].score, 10.5);
}

#[test]
fn test_trailing_sections_are_labeled_other() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let blocks = resume_chunk_ranker::processing::normalizer::normalize(&text).unwrap();
    let chunks = resume_chunk_ranker::processing::chunker::ChunkBuilder::new(40, 300)
        .unwrap()
        .build(&blocks);

    let last = chunks.last().unwrap();
    assert_eq!(last.source_section, SectionLabel::Other);
    assert!(last.text.starts_with("Interests"));
    assert_eq!(chunks[chunks.len() - 2].source_section, SectionLabel::Education);
}

#[tokio::test]
async fn test_markdown_resume_selection() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Professional Summary"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let selected = select_relevant_chunks(
        &text,
        &["Node.js", "PostgreSQL", "AWS", "Docker"],
        &["led", "built"],
        40,
        200,
        2,
    )
    .unwrap();

    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].source_section, SectionLabel::Header);
    assert_eq!(selected[1].source_section, SectionLabel::Experience);
    assert!(selected[1].text.starts_with("Experience\n\nAcme Corp"));
}

#[tokio::test]
async fn test_baseline_survives_tight_cap() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let index = resume_chunk_ranker::KeywordIndex::new(["postgresql", "docker"], ["built"]).unwrap();

    let result = ranker(40, 300, 1).rank(&text, &index).unwrap();

    assert_eq!(result.selected_count, 1);
    assert_eq!(result.chunks[0].chunk.order_index, 0);
    assert_eq!(result.chunks[0].chunk.source_section, SectionLabel::Header);
}

#[tokio::test]
async fn test_selection_is_deterministic() {
    let mut manager = InputManager::new().with_cache(false);
    let path = Path::new("tests/fixtures/sample_resume.txt");
    let text = manager.extract_text(path).await.unwrap();
    let requirements = manager
        .load_requirements(Path::new("tests/fixtures/requirements.json"))
        .await
        .unwrap();
    let index = requirements.keyword_index().unwrap();
    let ranker = ranker(60, 250, 4);

    let first = ranker.rank(&text, &index).unwrap();
    for _ in 0..10 {
        let again = ranker.rank(&manager.extract_text(path).await.unwrap(), &index).unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(manager.cache_size(), 0);
}

#[test]
fn test_coverage_and_bounds_on_fixture() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let blocks = resume_chunk_ranker::processing::normalizer::normalize(&text).unwrap();
    let builder = resume_chunk_ranker::processing::chunker::ChunkBuilder::new(100, 400).unwrap();
    let chunks = builder.build(&blocks);

    let covered: Vec<usize> = chunks.iter().flat_map(|c| c.blocks.clone()).collect();
    assert_eq!(covered, (0..blocks.len()).collect::<Vec<_>>());

    for chunk in &chunks[..chunks.len() - 1] {
        assert!(chunk.char_length >= 100, "chunk {} too short", chunk.order_index);
        assert!(chunk.char_length <= 400, "chunk {} too long", chunk.order_index);
    }
}

#[test]
fn test_empty_keywords_follow_section_bonus() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let none: [&str; 0] = [];
    let selected = select_relevant_chunks(&text, &none, &none, 40, 300, 3).unwrap();

    let order: Vec<usize> = selected.iter().map(|c| c.order_index).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(selected.len(), 3);
    // Header is the baseline; the two experience chunks carry the largest bonus.
    assert_eq!(
        selected.iter().map(|c| c.source_section).collect::<Vec<_>>(),
        vec![SectionLabel::Header, SectionLabel::Experience, SectionLabel::Experience]
    );
}

#[test]
fn test_empty_resume_is_rejected() {
    let result = select_relevant_chunks("\n\n   \n", &["rust"], &["led"], 10, 60, 2);
    assert!(matches!(result, Err(RankerError::EmptyInput(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(RankerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}
