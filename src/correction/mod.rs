//! 검색어 교정
//!
//! 정확 일치, 퍼지 후보, 오라클 추론 순으로 내려가는 교정 단계와
//! 종목명 전용 교정기를 담습니다.

pub mod cascade;
pub mod distance;
pub mod fuzzy;
pub mod instrument;
pub mod oracle;

pub use cascade::{CorrectionResult, Corrector, Provenance};
pub use distance::{bounded_distance, levenshtein_distance, levenshtein_similarity};
pub use fuzzy::{Candidate, FuzzyMatcher};
pub use instrument::{
    Instrument, InstrumentCorrection, InstrumentCorrector, InstrumentIndex, InstrumentLookup,
    InstrumentMatch, MemoryInstrumentIndex,
};
pub use oracle::{Oracle, OracleGateway, OracleRequest};
