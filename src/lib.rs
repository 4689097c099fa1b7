//! hansearch - 한국어 검색어 교정과 문서 순위

pub mod cache;
pub mod config;
pub mod core;
pub mod corpus;
pub mod correction;
pub mod engine;
pub mod error;
pub mod rank;
pub mod segmenter;

pub use crate::core::automaton::transliterate;
pub use crate::core::chosung::{classify, decompose_to_chosung, extract_syllables, QueryKind};
pub use config::SearchConfig;
pub use corpus::{MemoryCorpus, TermCorpus, TermRecord};
pub use correction::{CorrectionResult, Corrector, Provenance};
pub use engine::{QueryCorrection, RankedSearch, Searcher};
pub use error::{OracleError, Result, SearchError};
pub use rank::{Document, RankedDocument, Ranker};
