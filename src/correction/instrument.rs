//! 종목명 교정과 초성 검색
//!
//! 여러 시장(코스피, 코스닥 ...)의 종목 색인에서 자동완성 후보를 모아
//! 점수 내림차순, 이름 길이 오름차순으로 고르는 단일 단계 교정입니다.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::automaton::transliterate;
use crate::core::chosung::{
    chosung_similarity, classify, decompose_to_chosung, extract_syllables, QueryKind,
};
use crate::correction::distance::levenshtein_distance;
use crate::correction::oracle::{OracleGateway, OracleRequest};
use crate::error::Result;
use crate::segmenter::{ParticleSegmenter, Segmenter};

/// 자동완성 허용 편집 거리
const AUTOCOMPLETE_MAX_EDITS: usize = 2;
/// 오라클 힌트로 쓸 최소 초성 유사도
const HINT_MIN_SIMILARITY: f64 = 0.3;
const HINT_LIMIT: usize = 5;

/// 종목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub code: String,
    pub name: String,
    pub market: String,
}

/// 자동완성 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMatch {
    pub name: String,
    pub code: String,
    pub market: String,
    pub score: f64,
}

/// 종목명 교정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentCorrection {
    pub original: String,
    pub corrected: String,
    pub score: f64,
    pub code: Option<String>,
    pub market: Option<String>,
}

/// 종목 검색 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentLookup {
    pub results: Vec<Instrument>,
    pub original_query: String,
    /// 영문 자판 입력을 한글로 바꾼 경우
    pub converted_query: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub inferred_word: Option<String>,
}

/// 종목 색인 기능 (시장 하나)
pub trait InstrumentIndex: Send + Sync {
    /// 퍼지 자동완성 (점수 내림차순, 최대 `limit`개)
    fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<InstrumentMatch>>;

    /// 전체 종목
    fn instruments(&self) -> Result<Vec<Instrument>>;
}

/// 메모리 기반 종목 색인
#[derive(Debug, Clone, Default)]
pub struct MemoryInstrumentIndex {
    instruments: Vec<Instrument>,
}

impl MemoryInstrumentIndex {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// 첫 글자가 같고, 이름 앞부분과의 편집 거리가 2 이하이면 점수 부여
    ///
    /// `score = 1/(d+1) × (1 + 비교 길이/이름 길이)`
    fn score(query: &[char], name: &str) -> Option<f64> {
        let name_chars: Vec<char> = name.chars().collect();
        let (q0, n0) = (query.first()?, name_chars.first()?);
        if !q0.to_lowercase().eq(n0.to_lowercase()) {
            return None;
        }
        let prefix_len = query.len().min(name_chars.len());
        let prefix: String = name_chars[..prefix_len].iter().collect();
        let q: String = query.iter().collect();
        let distance = levenshtein_distance(&q.to_lowercase(), &prefix.to_lowercase());
        if distance > AUTOCOMPLETE_MAX_EDITS {
            return None;
        }
        let coverage = prefix_len as f64 / name_chars.len() as f64;
        Some((1.0 + coverage) / (distance as f64 + 1.0))
    }
}

impl InstrumentIndex for MemoryInstrumentIndex {
    fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<InstrumentMatch>> {
        let q: Vec<char> = query.trim().chars().collect();
        let mut matches: Vec<InstrumentMatch> = self
            .instruments
            .iter()
            .filter_map(|inst| {
                Self::score(&q, &inst.name).map(|score| InstrumentMatch {
                    name: inst.name.clone(),
                    code: inst.code.clone(),
                    market: inst.market.clone(),
                    score,
                })
            })
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);
        Ok(matches)
    }

    fn instruments(&self) -> Result<Vec<Instrument>> {
        Ok(self.instruments.clone())
    }
}

/// 종목명 교정기
pub struct InstrumentCorrector {
    indexes: Vec<Arc<dyn InstrumentIndex>>,
    segmenter: Arc<dyn Segmenter>,
    oracle: Option<Arc<OracleGateway>>,
    limit: usize,
}

impl InstrumentCorrector {
    pub fn new(indexes: Vec<Arc<dyn InstrumentIndex>>, limit: usize) -> Self {
        Self {
            indexes,
            segmenter: Arc::new(ParticleSegmenter::new()),
            oracle: None,
            limit,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_oracle(mut self, oracle: Arc<OracleGateway>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// 모든 색인의 자동완성 후보를 합쳐 상위 `limit`개
    pub fn suggest(&self, query: &str) -> Result<Vec<InstrumentMatch>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut merged = Vec::new();
        for index in &self.indexes {
            merged.extend(index.autocomplete(query, self.limit)?);
        }
        merged.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
        });
        merged.truncate(self.limit);
        Ok(merged)
    }

    /// 가장 유력한 종목명 (없으면 원문, 점수 0)
    pub fn best(&self, query: &str) -> Result<InstrumentCorrection> {
        let original = query.trim().to_string();
        let correction = match self.suggest(&original)?.into_iter().next() {
            Some(best) => InstrumentCorrection {
                original,
                corrected: best.name,
                score: best.score,
                code: Some(best.code),
                market: Some(best.market),
            },
            None => InstrumentCorrection {
                corrected: original.clone(),
                original,
                score: 0.0,
                code: None,
                market: None,
            },
        };
        Ok(correction)
    }

    /// 초성/혼합/일반 질의로 종목 검색, 결과가 없으면 오라클 제안
    pub fn lookup(&self, query: &str) -> Result<InstrumentLookup> {
        let original = query.trim();
        if original.is_empty() {
            return Ok(InstrumentLookup::default());
        }

        let is_converted = original.chars().all(|c| c.is_ascii_alphabetic());
        let converted = is_converted.then(|| transliterate(original));
        let search = converted.as_deref().unwrap_or(original);
        let kind = classify(search);

        let instruments = self.all_instruments()?;
        let results: Vec<Instrument> = instruments
            .iter()
            .filter(|inst| self.matches(inst, search, kind, is_converted))
            .cloned()
            .collect();

        let mut lookup = InstrumentLookup {
            original_query: original.to_string(),
            converted_query: converted.clone(),
            ..InstrumentLookup::default()
        };

        if results.is_empty()
            && kind != QueryKind::PureChosung
            && original.chars().count() >= 2
        {
            if let Some(oracle) = &self.oracle {
                let hints = similar_names(search, &instruments);
                let request = OracleRequest {
                    original: original.to_string(),
                    transliterated: search.to_string(),
                    hints,
                };
                if is_converted {
                    let word_request = OracleRequest {
                        hints: Vec::new(),
                        ..request.clone()
                    };
                    lookup.inferred_word = oracle
                        .infer(&word_request)
                        .map_err(|e| log::warn!("종목 단어 추론 실패: {}", e))
                        .ok();
                }
                lookup.suggestions = oracle
                    .suggest_list(&request)
                    .map_err(|e| log::warn!("종목 제안 실패: {}", e))
                    .ok()
                    .filter(|list| !list.is_empty());
            }
        }

        lookup.results = results;
        Ok(lookup)
    }

    fn all_instruments(&self) -> Result<Vec<Instrument>> {
        let mut seen = HashSet::new();
        let mut all = Vec::new();
        for index in &self.indexes {
            for inst in index.instruments()? {
                if seen.insert(inst.code.clone()) {
                    all.push(inst);
                }
            }
        }
        Ok(all)
    }

    fn matches(&self, inst: &Instrument, search: &str, kind: QueryKind, converted: bool) -> bool {
        let name_chosung = decompose_to_chosung(&inst.name);
        match kind {
            QueryKind::PureChosung => name_chosung.contains(search),
            _ if kind == QueryKind::Mixed || converted => {
                if !name_chosung.contains(&decompose_to_chosung(search)) {
                    return false;
                }
                // 영문 변환 질의는 초성만 비교
                converted || extract_syllables(search).chars().all(|c| inst.name.contains(c))
            }
            _ => {
                let mut keywords = self.segmenter.segment(search);
                if keywords.is_empty() {
                    keywords.push(search.to_string());
                }
                let name = inst.name.to_lowercase();
                keywords.iter().any(|kw| {
                    name.contains(&kw.to_lowercase())
                        || (kw.chars().all(|c| c.is_ascii_digit()) && inst.code.contains(kw.as_str()))
                })
            }
        }
    }
}

/// 초성 유사도가 높은 종목명 (오라클 힌트)
fn similar_names(query: &str, instruments: &[Instrument]) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = instruments
        .iter()
        .map(|inst| (chosung_similarity(query, &inst.name), inst.name.as_str()))
        .filter(|(sim, _)| *sim > HINT_MIN_SIMILARITY)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(HINT_LIMIT)
        .map(|(_, name)| name.to_string())
        .collect()
}
