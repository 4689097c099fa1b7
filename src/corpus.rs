//! 용어 저장소
//!
//! 교정 로직은 `TermCorpus` 트레이트로만 용어 통계를 읽습니다.
//! `MemoryCorpus`는 메모리 기반 기본 구현이며 뉴스 본문에서 용어 빈도를 수집할 수 있습니다.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::unicode::is_syllable;
use crate::error::{Result, SearchError};
use crate::segmenter::Segmenter;

/// 수집 대상 뉴스 카테고리
pub const INGEST_CATEGORIES: [&str; 7] = [
    "금융",
    "증권",
    "산업/재계",
    "중기/벤처",
    "글로벌 경제",
    "생활경제",
    "경제 일반",
];

/// 용어 통계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub term: String,
    /// 빈도가 기록되지 않은 용어는 None
    #[serde(default, rename = "freq")]
    pub frequency: Option<u64>,
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_category: Option<String>,
}

impl TermRecord {
    pub fn new(term: impl Into<String>, frequency: u64) -> Self {
        Self {
            term: term.into(),
            frequency: Some(frequency),
            categories: BTreeMap::new(),
            top_category: None,
        }
    }

    /// 빈도 (기록 없으면 0)
    pub fn freq(&self) -> u64 {
        self.frequency.unwrap_or(0)
    }

    /// 가장 많이 등장한 카테고리 재계산 (동률이면 사전순으로 앞선 것)
    fn refresh_top_category(&mut self) {
        self.top_category = self
            .categories
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(cat, _)| cat.clone());
    }
}

/// 사전 필터 조건
#[derive(Debug, Clone, PartialEq)]
pub struct PrefilterQuery {
    /// 첫 글자 (대소문자 무시)
    pub first_char: char,
    /// 허용 길이 (문자 수)
    pub length_range: RangeInclusive<usize>,
    /// 최소 빈도 (빈도 기록 없는 용어는 통과)
    pub min_frequency: Option<u64>,
    /// 최대 반환 개수
    pub limit: usize,
}

impl PrefilterQuery {
    /// 레코드가 조건을 만족하는지 확인
    pub fn matches(&self, record: &TermRecord) -> bool {
        let Some(first) = record.term.chars().next() else {
            return false;
        };
        if !first.to_lowercase().eq(self.first_char.to_lowercase()) {
            return false;
        }
        if !self.length_range.contains(&record.term.chars().count()) {
            return false;
        }
        match (self.min_frequency, record.frequency) {
            (Some(min), Some(freq)) => freq >= min,
            _ => true,
        }
    }
}

/// 용어 저장소 접근 기능
pub trait TermCorpus: Send + Sync {
    /// 조건에 맞는 후보를 빈도 내림차순으로 최대 `limit`개
    fn prefilter(&self, query: &PrefilterQuery) -> Result<Vec<TermRecord>>;

    /// 정확히 일치하는 용어
    fn exact_lookup(&self, term: &str) -> Result<Option<TermRecord>>;
}

/// 메모리 기반 용어 저장소
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    terms: RwLock<HashMap<String, TermRecord>>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = TermRecord>) -> Self {
        let terms = records
            .into_iter()
            .map(|r| (r.term.clone(), r))
            .collect();
        Self {
            terms: RwLock::new(terms),
        }
    }

    /// JSON 배열 파일에서 로드
    ///
    /// ```json
    /// [{"term": "삼성전자", "freq": 1200, "top_category": "증권"}]
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SearchError::corpus_unavailable(format!("{}: {}", path.display(), e))
        })?;
        let records: Vec<TermRecord> = serde_json::from_str(&content)?;
        log::info!("용어 {}개 로드: {}", records.len(), path.display());
        Ok(Self::from_records(records))
    }

    /// JSON 배열 파일로 저장
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut records: Vec<TermRecord> = self.terms.read().values().cloned().collect();
        records.sort_by(|a, b| a.term.cmp(&b.term));
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.terms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.read().is_empty()
    }

    /// 용어 하나의 빈도를 1 증가
    pub fn ingest_term(&self, term: &str, category: &str) {
        let mut terms = self.terms.write();
        let record = terms
            .entry(term.to_string())
            .or_insert_with(|| TermRecord::new(term, 0));
        record.frequency = Some(record.freq() + 1);
        *record.categories.entry(category.to_string()).or_insert(0) += 1;
        record.refresh_top_category();
    }

    /// 기사 하나에서 명사를 뽑아 빈도 누적
    ///
    /// 수집 대상 카테고리가 아니면 무시. 반환값은 누적된 명사 수
    pub fn ingest_document(
        &self,
        title: &str,
        content: &str,
        category: &str,
        segmenter: &dyn Segmenter,
        stopwords: &HashSet<String>,
    ) -> usize {
        if !INGEST_CATEGORIES.contains(&category) {
            return 0;
        }
        let text = format!("{} {}", title, content);
        let text = text.trim();
        if text.chars().count() < 2 {
            return 0;
        }

        let nouns: Vec<String> = segmenter
            .segment(text)
            .into_iter()
            .filter(|n| {
                n.chars().count() >= 2 && n.chars().all(is_syllable) && !stopwords.contains(n)
            })
            .collect();
        for noun in &nouns {
            self.ingest_term(noun, category);
        }
        nouns.len()
    }

    /// 빈도 상위 용어
    pub fn top_terms(&self, limit: usize) -> Vec<TermRecord> {
        let mut records: Vec<TermRecord> = self.terms.read().values().cloned().collect();
        records.sort_by(|a, b| b.freq().cmp(&a.freq()).then_with(|| a.term.cmp(&b.term)));
        records.truncate(limit);
        records
    }
}

impl TermCorpus for MemoryCorpus {
    fn prefilter(&self, query: &PrefilterQuery) -> Result<Vec<TermRecord>> {
        let mut matched: Vec<TermRecord> = self
            .terms
            .read()
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.freq().cmp(&a.freq()).then_with(|| a.term.cmp(&b.term)));
        matched.truncate(query.limit);
        Ok(matched)
    }

    fn exact_lookup(&self, term: &str) -> Result<Option<TermRecord>> {
        Ok(self.terms.read().get(term).cloned())
    }
}
