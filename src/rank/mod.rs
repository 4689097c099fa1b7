//! 문서 관련도 순위

pub mod ranker;
pub mod tfidf;
pub mod tokenizer;

pub use ranker::{Document, RankedDocument, Ranker};
pub use tokenizer::tokenize;
