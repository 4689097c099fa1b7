//! 퍼지 후보 생성
//!
//! 수만 개 용어 전체에 편집 거리를 계산하지 않고, 저장소의 사전 필터
//! (첫 글자 일치, 길이 ± slack, 최소 빈도, 최대 100개)로 좁힌 뒤 거리를 계산합니다.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::core::chosung::chosung_similarity;
use crate::corpus::{PrefilterQuery, TermCorpus, TermRecord};
use crate::correction::distance::bounded_distance;
use crate::error::Result;

/// 힌트로 쓸 최소 초성 유사도
const HINT_MIN_SIMILARITY: f64 = 0.3;

/// 교정 후보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub term: String,
    pub frequency: u64,
    pub distance: usize,
    pub score: f64,
    pub top_category: Option<String>,
}

/// `1 / (distance + 1) + frequency / 10000`
pub fn candidate_score(distance: usize, frequency: u64) -> f64 {
    1.0 / (distance as f64 + 1.0) + frequency as f64 / 10000.0
}

/// 퍼지 후보 생성기
pub struct FuzzyMatcher<'a> {
    corpus: &'a dyn TermCorpus,
    config: &'a SearchConfig,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(corpus: &'a dyn TermCorpus, config: &'a SearchConfig) -> Self {
        Self { corpus, config }
    }

    /// 질의에 대한 상위 후보 (짧은 질의나 빈 필터 결과는 빈 목록)
    pub fn suggest(&self, query: &str) -> Result<Vec<Candidate>> {
        let pool = self.prefilter_pool(query)?;
        Ok(self.score_pool(query, &pool))
    }

    /// 저장소 사전 필터 결과
    pub fn prefilter_pool(&self, query: &str) -> Result<Vec<TermRecord>> {
        let query = query.trim();
        let len = query.chars().count();
        let Some(first) = query.chars().next() else {
            return Ok(Vec::new());
        };
        if len < self.config.min_query_chars {
            return Ok(Vec::new());
        }

        let filter = PrefilterQuery {
            first_char: first.to_lowercase().next().unwrap_or(first),
            length_range: len.saturating_sub(self.config.length_slack)
                ..=len + self.config.length_slack,
            min_frequency: self.config.min_frequency,
            limit: self.config.prefilter_limit,
        };
        let pool = self.corpus.prefilter(&filter)?;
        log::debug!("사전 필터 '{}': {}개", query, pool.len());
        Ok(pool)
    }

    /// 후보 풀에 편집 거리를 매겨 정렬
    ///
    /// 정렬 기준: 거리 오름차순, 빈도 내림차순, 점수 내림차순
    pub fn score_pool(&self, query: &str, pool: &[TermRecord]) -> Vec<Candidate> {
        let query = query.trim();
        let mut candidates: Vec<Candidate> = pool
            .iter()
            .filter(|r| r.term.chars().count() >= 2)
            .filter_map(|r| {
                let distance = bounded_distance(query, &r.term, self.config.max_edit_distance)?;
                Some(Candidate {
                    term: r.term.clone(),
                    frequency: r.freq(),
                    distance,
                    score: candidate_score(distance, r.freq()),
                    top_category: r.top_category.clone(),
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| b.score.total_cmp(&a.score))
        });
        candidates.truncate(self.config.candidate_limit);
        candidates
    }

    /// 거리 한도를 넘었지만 초성 구조가 비슷한 용어 (오라클 힌트용)
    pub fn near_misses(&self, query: &str, pool: &[TermRecord], limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = pool
            .iter()
            .map(|r| (chosung_similarity(query, &r.term), r.term.as_str()))
            .filter(|(sim, _)| *sim > HINT_MIN_SIMILARITY)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, term)| term.to_string())
            .collect()
    }
}
