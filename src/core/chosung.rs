//! 초성 추출과 질의 유형 판정

use serde::{Deserialize, Serialize};

use crate::core::unicode::{decompose_syllable, is_consonant_jamo, is_syllable, lead_jamo};
use crate::correction::distance::levenshtein_similarity;

/// 질의 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// 모든 문자가 초성 자모 (예: "ㅅㅅㅈㅈ")
    PureChosung,
    /// 초성 자모와 완성형 음절이 섞임 (예: "삼ㅅ")
    Mixed,
    /// 그 외 전부
    Full,
}

/// 완성형 음절마다 초성을 뽑아 이어붙임, 나머지 문자는 그대로
pub fn decompose_to_chosung(text: &str) -> String {
    text.chars()
        .map(|c| match decompose_syllable(c) {
            Some((lead, _, _)) => lead_jamo(lead).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// 질의 유형 판정
///
/// 빈 문자열은 `Full`
pub fn classify(query: &str) -> QueryKind {
    let mut has_jamo = false;
    let mut has_syllable = false;
    let mut all_jamo = true;

    for c in query.chars() {
        if is_consonant_jamo(c) {
            has_jamo = true;
        } else {
            all_jamo = false;
            if is_syllable(c) {
                has_syllable = true;
            }
        }
    }

    if has_jamo && all_jamo {
        QueryKind::PureChosung
    } else if has_jamo && has_syllable {
        QueryKind::Mixed
    } else {
        QueryKind::Full
    }
}

/// 완성형 음절만 남김
pub fn extract_syllables(text: &str) -> String {
    text.chars().filter(|&c| is_syllable(c)).collect()
}

/// 두 문자열의 초성 열 유사도 (0.0 ~ 1.0)
pub fn chosung_similarity(a: &str, b: &str) -> f64 {
    levenshtein_similarity(&decompose_to_chosung(a), &decompose_to_chosung(b))
}
