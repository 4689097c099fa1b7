//! 통합 테스트 - 자판 변환, 교정, 순위

use std::sync::Arc;

use hansearch::config::{load_config, save_config};
use hansearch::core::unicode::{compose_syllable, decompose_syllable, LEAD_COUNT, TAIL_COUNT, VOWEL_COUNT};
use hansearch::segmenter::{default_ingest_stopwords, ParticleSegmenter};
use hansearch::{
    classify, transliterate, Document, MemoryCorpus, Provenance, QueryKind, SearchConfig,
    SearchError, Searcher, TermRecord,
};

fn searcher() -> Searcher {
    let corpus = MemoryCorpus::from_records(vec![
        TermRecord::new("삼성전자", 1200),
        TermRecord::new("삼성", 900),
        TermRecord::new("금리", 800),
        TermRecord::new("테슬라", 700),
    ]);
    Searcher::new(Arc::new(corpus), SearchConfig::default())
}

#[test]
fn test_basic_jamo_composition() {
    assert_eq!(transliterate("rkskek"), "가나다");
    assert_eq!(transliterate("dkssudgktpdy"), "안녕하세요");
    assert_eq!(transliterate("tkatjd"), "삼성");
}

#[test]
fn test_tail_handling() {
    assert_eq!(transliterate("gksrmf"), "한글");
    assert_eq!(transliterate("dkswl"), "안지"); // 뒤에 모음이 오면 ㄵ 안 만듦
    assert_eq!(transliterate("dlfr"), "읽");
    assert_eq!(transliterate("dhksfy"), "완료");
}

#[test]
fn test_double_consonant_and_passthrough() {
    assert_eq!(transliterate("Tks"), "싼");
    assert_eq!(transliterate("Rk"), "까");
    assert_eq!(transliterate("123rksk"), "123가나");
    assert_eq!(transliterate("rk!sk"), "가!나");
    assert_eq!(transliterate(""), "");
}

#[test]
fn test_transliterate_is_deterministic() {
    for input in ["tkatjdwjswk", "dkssud", "Qkfrk", "hk", "r r"] {
        assert_eq!(transliterate(input), transliterate(input));
    }
}

#[test]
fn test_syllable_round_trip() {
    for lead in 0..LEAD_COUNT {
        for vowel in 0..VOWEL_COUNT {
            for tail in 0..TAIL_COUNT {
                let c = compose_syllable(lead, vowel, tail).unwrap();
                assert_eq!(decompose_syllable(c), Some((lead, vowel, tail)));
            }
        }
    }
}

#[test]
fn test_classify_partitions() {
    assert_eq!(classify("ㅅㅅㅈㅈ"), QueryKind::PureChosung);
    assert_eq!(classify("삼ㅅ"), QueryKind::Mixed);
    assert_eq!(classify("삼성"), QueryKind::Full);
    assert_eq!(classify("samsung"), QueryKind::Full);
    assert_eq!(classify(""), QueryKind::Full);
}

#[test]
fn test_correct_too_short() {
    let s = searcher();
    for input in ["", "a"] {
        let result = s.correct(input).unwrap();
        assert_eq!(result.provenance, Provenance::TooShort);
        assert_eq!(result.confidence, 0.0);
    }
}

#[test]
fn test_correct_exact_and_fuzzy() {
    let s = searcher();
    let exact = s.correct("삼성전자").unwrap();
    assert_eq!(exact.provenance, Provenance::Exact);
    assert_eq!(exact.confidence, 100.0);
    assert_eq!(exact.corrected, exact.original);

    let fuzzy = s.correct("삼성쩐자").unwrap();
    assert_eq!(fuzzy.provenance, Provenance::Fuzzy);
    assert_eq!(fuzzy.corrected, "삼성전자");
    assert_eq!(fuzzy.confidence, 82.0);
}

#[test]
fn test_correct_english_keystrokes() {
    let result = searcher().correct("xptmffk").unwrap();
    assert_eq!(result.transliterated.as_deref(), Some("테슬라"));
    assert_eq!(result.provenance, Provenance::Exact);
    assert_eq!(result.corrected, "테슬라");
}

#[test]
fn test_correct_without_oracle_downgrades() {
    let result = searcher().correct("전혀없는말").unwrap();
    assert_eq!(result.provenance, Provenance::OracleUnavailable);
    assert_eq!(result.corrected, "전혀없는말");
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_rank_properties() {
    let s = searcher();
    let docs = vec![
        Document::new("a", "테슬라 주가 급등", "전기차 판매 호조"),
        Document::new("b", "금리 동결", "한국은행 기준금리 동결"),
        Document::new("c", "기준금리 전망", "시장은 금리 인하를 기대"),
        Document::new("d", "", ""),
    ];
    assert!(s.rank("", &docs).is_empty());

    let ranked = s.rank("금리", &docs);
    assert!(!ranked.is_empty());
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(ranked.iter().all(|d| d.score >= 0.05));
    assert!(ranked.iter().all(|d| d.id != "d"));
}

#[test]
fn test_rank_corrected_uses_corrected_term() {
    let docs = vec![
        Document::new("1", "삼성전자 실적", "반도체 회복"),
        Document::new("2", "날씨", "맑음"),
    ];
    let search = searcher().rank_corrected("삼성쩐자", &docs).unwrap();
    assert_eq!(search.corrected_query, "삼성전자");
    assert_eq!(search.total, search.ranked_docs.len());
    assert_eq!(search.ranked_docs[0].id, "1");
}

#[test]
fn test_corpus_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terms.json");

    let corpus = MemoryCorpus::new();
    let n = corpus.ingest_document(
        "삼성전자 실적 발표",
        "삼성전자가 반도체 실적을 발표했다",
        "증권",
        &ParticleSegmenter::new(),
        &default_ingest_stopwords(),
    );
    assert!(n > 0);
    corpus.save(&path).unwrap();

    let loaded = MemoryCorpus::load(&path).unwrap();
    assert_eq!(loaded.len(), corpus.len());
    let top = loaded.top_terms(1);
    assert_eq!(top[0].term, "삼성전자");
    assert_eq!(top[0].top_category.as_deref(), Some("증권"));
}

#[test]
fn test_missing_corpus_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = MemoryCorpus::load(&dir.path().join("none.json")).unwrap_err();
    assert!(matches!(err, SearchError::CorpusUnavailable(_)));
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = SearchConfig {
        max_edit_distance: 2,
        ..SearchConfig::default()
    };
    save_config(&path, &config).unwrap();
    assert_eq!(load_config(&path).max_edit_distance, 2);
}
