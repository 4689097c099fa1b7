//! 검색 진입점
//!
//! 저장소, 교정기, 순위기, 교정 결과 캐시를 묶어 호출자에게 노출합니다.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::SharedCache;
use crate::config::SearchConfig;
use crate::core::automaton;
use crate::core::chosung::{self, QueryKind};
use crate::corpus::TermCorpus;
use crate::correction::cascade::{needs_transliteration, CorrectionResult, Corrector, Provenance};
use crate::correction::instrument::{InstrumentCorrector, InstrumentLookup};
use crate::correction::oracle::{Oracle, OracleGateway};
use crate::error::Result;
use crate::rank::{Document, RankedDocument, Ranker};

/// 자판 변환과 교정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCorrection {
    pub original: String,
    pub ime_converted: Option<String>,
    pub correction: CorrectionResult,
}

/// 교정된 질의로 매긴 순위
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSearch {
    pub original_query: String,
    pub corrected_query: String,
    pub correction: CorrectionResult,
    pub ranked_docs: Vec<RankedDocument>,
    pub total: usize,
}

pub struct Searcher {
    corrector: Corrector,
    ranker: Ranker,
    cache: SharedCache<String, CorrectionResult>,
    instruments: Option<InstrumentCorrector>,
}

impl Searcher {
    pub fn new(corpus: Arc<dyn TermCorpus>, config: SearchConfig) -> Self {
        Self {
            ranker: Ranker::from_config(&config),
            cache: SharedCache::new(config.correction_cache_capacity),
            corrector: Corrector::new(corpus, config),
            instruments: None,
        }
    }

    /// 오라클 연결 (제한 시간, 캐시 크기는 설정값)
    pub fn with_oracle(mut self, oracle: Arc<dyn Oracle>) -> Self {
        let config = self.corrector.config();
        let gateway =
            OracleGateway::new(oracle, config.oracle_timeout(), config.oracle_cache_capacity);
        self.corrector = self.corrector.with_oracle(gateway);
        self
    }

    pub fn with_instruments(mut self, instruments: InstrumentCorrector) -> Self {
        self.instruments = Some(instruments);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        self.corrector.config()
    }

    pub fn transliterate(&self, text: &str) -> String {
        automaton::transliterate(text)
    }

    pub fn classify_query(&self, text: &str) -> QueryKind {
        chosung::classify(text)
    }

    /// 교정 (같은 질의는 캐시에서)
    pub fn correct(&self, term: &str) -> Result<CorrectionResult> {
        let key = term.trim().to_string();
        if let Some(hit) = self.cache.get(&key) {
            log::debug!("교정 캐시 적중: '{}'", key);
            return Ok(hit);
        }
        let result = self.corrector.correct(&key)?;
        // 오라클 실패는 다음 호출에서 회복될 수 있음
        if result.provenance != Provenance::OracleUnavailable {
            self.cache.insert(key, result.clone());
        }
        Ok(result)
    }

    pub fn rank(&self, query: &str, documents: &[Document]) -> Vec<RankedDocument> {
        self.ranker.rank(query, documents)
    }

    pub fn correct_query(&self, query: &str) -> Result<QueryCorrection> {
        let original = query.trim().to_string();
        let ime_converted = needs_transliteration(&original).then(|| automaton::transliterate(&original));
        let correction = self.correct(&original)?;
        Ok(QueryCorrection {
            original,
            ime_converted,
            correction,
        })
    }

    /// 질의를 교정한 뒤 교정어(소문자)로 순위
    pub fn rank_corrected(&self, query: &str, documents: &[Document]) -> Result<RankedSearch> {
        let correction = self.correct(query)?;
        let corrected_query = correction.corrected.to_lowercase();
        let ranked_docs = self.rank(&corrected_query, documents);
        Ok(RankedSearch {
            original_query: query.trim().to_string(),
            total: ranked_docs.len(),
            corrected_query,
            correction,
            ranked_docs,
        })
    }

    /// 종목 검색 (종목 색인이 없으면 빈 결과)
    pub fn lookup_instrument(&self, query: &str) -> Result<InstrumentLookup> {
        match &self.instruments {
            Some(instruments) => instruments.lookup(query),
            None => Ok(InstrumentLookup {
                original_query: query.trim().to_string(),
                ..InstrumentLookup::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{MemoryCorpus, TermRecord};
    use crate::correction::instrument::{Instrument, MemoryInstrumentIndex};
    use crate::error::OracleError;
    use crate::correction::oracle::OracleRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn corpus() -> Arc<MemoryCorpus> {
        Arc::new(MemoryCorpus::from_records(vec![
            TermRecord::new("삼성전자", 1200),
            TermRecord::new("금리", 800),
        ]))
    }

    struct CountingOracle {
        calls: AtomicUsize,
        reply: std::result::Result<String, OracleError>,
    }

    impl Oracle for CountingOracle {
        fn infer(&self, _request: &OracleRequest) -> std::result::Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        fn suggest_list(
            &self,
            _request: &OracleRequest,
        ) -> std::result::Result<String, OracleError> {
            Ok("[]".to_string())
        }
    }

    #[test]
    fn test_pure_helpers() {
        let searcher = Searcher::new(corpus(), SearchConfig::default());
        assert_eq!(searcher.transliterate("tkatjd"), "삼성");
        assert_eq!(searcher.classify_query("ㅅㅅ"), QueryKind::PureChosung);
    }

    #[test]
    fn test_correct_is_cached() {
        let searcher = Searcher::new(corpus(), SearchConfig::default());
        let first = searcher.correct("삼성쩐자").unwrap();
        let second = searcher.correct(" 삼성쩐자 ").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.corrected, "삼성전자");
    }

    #[test]
    fn test_oracle_failures_are_not_cached() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
            reply: Err(OracleError::Unavailable),
        });
        let searcher = Searcher::new(corpus(), SearchConfig::default()).with_oracle(oracle.clone());

        let result = searcher.correct("없는단어").unwrap();
        assert_eq!(result.provenance, Provenance::OracleUnavailable);
        searcher.correct("없는단어").unwrap();
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_correct_query_reports_conversion() {
        let searcher = Searcher::new(corpus(), SearchConfig::default());
        let qc = searcher.correct_query("tkatjdwjswk").unwrap();
        assert_eq!(qc.ime_converted.as_deref(), Some("삼성전자"));
        assert_eq!(qc.correction.provenance, Provenance::Exact);

        let qc = searcher.correct_query("금리").unwrap();
        assert!(qc.ime_converted.is_none());
    }

    #[test]
    fn test_rank_corrected() {
        let searcher = Searcher::new(corpus(), SearchConfig::default());
        let docs = vec![
            Document::new("1", "금리 동결", "기준금리 유지"),
            Document::new("2", "날씨", "맑음"),
        ];
        let search = searcher.rank_corrected("rmaFl", &docs).unwrap();
        assert_eq!(search.corrected_query, "금리");
        assert_eq!(search.total, 1);
        assert_eq!(search.ranked_docs[0].id, "1");
    }

    #[test]
    fn test_lookup_instrument() {
        let searcher = Searcher::new(corpus(), SearchConfig::default());
        assert!(searcher.lookup_instrument("삼성").unwrap().results.is_empty());

        let index = MemoryInstrumentIndex::new(vec![Instrument {
            code: "005930".to_string(),
            name: "삼성전자".to_string(),
            market: "KOSPI".to_string(),
        }]);
        let searcher = searcher.with_instruments(InstrumentCorrector::new(vec![Arc::new(index)], 5));
        assert_eq!(searcher.lookup_instrument("ㅅㅅ").unwrap().results.len(), 1);
    }
}
