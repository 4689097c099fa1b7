//! 관련도 순위
//!
//! 점수 = 1.4 × 코사인 유사도 + 제목 위치 가산 + 본문 위치 가산 + 근접도 가산

use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::rank::tfidf::{cosine_similarity, TfidfVectorizer};
use crate::rank::tokenizer::tokenize;

const COSINE_WEIGHT: f64 = 1.4;
const TITLE_MAX: f64 = 0.20;
const TITLE_MIN: f64 = 0.05;
const CONTENT_MAX: f64 = 0.12;
const CONTENT_MIN: f64 = 0.03;
const PROXIMITY_MAX: f64 = 0.15;
/// 근접도 가산이 0이 되는 간격 (문자)
const PROXIMITY_WINDOW: f64 = 80.0;

/// 순위를 매길 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// 점수가 매겨진 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub score: f64,
}

/// TF-IDF 순위기
#[derive(Debug, Clone)]
pub struct Ranker {
    min_score: f64,
    max_features: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl Ranker {
    pub fn new(min_score: f64, max_features: usize) -> Self {
        Self {
            min_score,
            max_features,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.rank_min_score, config.max_features)
    }

    /// 질의와 관련된 문서를 점수 내림차순으로 (동점은 입력 순서)
    pub fn rank(&self, query: &str, documents: &[Document]) -> Vec<RankedDocument> {
        let started = Instant::now();

        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            log::debug!("순위: 질의 토큰 없음 '{}'", query);
            return Vec::new();
        }

        let mut corpus = Vec::with_capacity(documents.len() + 1);
        corpus.push(query_tokens.clone());
        corpus.extend(
            documents
                .iter()
                .map(|d| tokenize(&format!("{} {}", d.title, d.content))),
        );

        let vectors = TfidfVectorizer::new(Some(self.max_features)).fit_transform(&corpus);
        let Some((query_vec, doc_vecs)) = vectors.split_first() else {
            return Vec::new();
        };
        log::debug!("순위: 벡터화 {:?}", started.elapsed());

        let needle = query.trim().to_lowercase();
        let unique_tokens: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();

        let mut ranked: Vec<RankedDocument> = documents
            .iter()
            .zip(doc_vecs)
            .filter_map(|(doc, vec)| {
                let title = doc.title.to_lowercase();
                let content = doc.content.to_lowercase();
                let score = COSINE_WEIGHT * cosine_similarity(query_vec, vec)
                    + position_bonus(&title, &needle, TITLE_MIN, TITLE_MAX)
                    + position_bonus(&content, &needle, CONTENT_MIN, CONTENT_MAX)
                    + proximity_bonus(&content, &unique_tokens);

                (score >= self.min_score).then(|| RankedDocument {
                    id: doc.id.clone(),
                    title: doc.title.clone(),
                    content: doc.content.clone(),
                    score,
                })
            })
            .collect();

        // sort_by는 안정 정렬
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        log::info!(
            "순위 '{}': 문서 {}개 중 {}개, {:?}",
            query,
            documents.len(),
            ranked.len(),
            started.elapsed()
        );
        ranked
    }
}

/// 문자 단위 첫 위치
fn char_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count())
}

/// `max(min, max × (1 − p/len))`, 없으면 0
fn position_bonus(text: &str, needle: &str, min: f64, max: f64) -> f64 {
    match char_offset(text, needle) {
        Some(p) => {
            let len = text.chars().count().max(1) as f64;
            (max * (1.0 - p as f64 / len)).max(min)
        }
        None => 0.0,
    }
}

/// 본문에서 찾은 질의 토큰 위치 사이 최소 간격 기반
fn proximity_bonus(content: &str, tokens: &HashSet<&str>) -> f64 {
    let mut positions: Vec<usize> = tokens
        .iter()
        .filter_map(|t| char_offset(content, t))
        .collect();
    if positions.len() < 2 {
        return 0.0;
    }
    positions.sort_unstable();
    let gap = positions
        .windows(2)
        .map(|w| w[1] - w[0])
        .min()
        .unwrap_or(0);
    (PROXIMITY_MAX * (1.0 - gap as f64 / PROXIMITY_WINDOW)).max(0.0)
}
