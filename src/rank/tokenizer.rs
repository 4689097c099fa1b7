//! 순위용 토크나이저
//!
//! 형태소 분석기 없이 한글 2글자 조각으로 형태소 경계를 근사합니다.
//! 한 글자 토큰은 모두 버립니다.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::unicode::is_syllable;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w가-힣]").unwrap();
    static ref CALENDAR: Regex = Regex::new(r"^(?:\d{4}년|\d{1,2}월|\d{1,2}일)$").unwrap();
    static ref CLOCK: Regex = Regex::new(r"^(?:\d{1,2}시|\d{1,2}분|\d{1,2}초)$").unwrap();

    /// 통신사, 바이라인, 접속어
    static ref STOPWORDS: HashSet<&'static str> = [
        "그리고", "하지만", "관련", "최근", "대한", "등",
        "기자", "사진", "뉴스", "보도",
        "서울", "중구", "서울=연합뉴스", "서울=뉴스1",
        "연합뉴스", "뉴스1", "이데일리", "머니투데이", "전자신문", "서울경제",
        "한국경제", "조선일보", "중앙일보", "동아일보",
    ]
    .into_iter()
    .collect();
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// 숫자, 날짜/시각 단위, 한 글자 단어
fn is_noise(word: &str) -> bool {
    word.chars().all(char::is_numeric)
        || CALENDAR.is_match(word)
        || CLOCK.is_match(word)
        || word.chars().count() == 1
}

fn keep(token: &str) -> bool {
    token.chars().count() > 1 && !is_stopword(token)
}

/// 텍스트를 중복 없는 토큰 목록으로 (처음 나온 순서 유지)
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned = NON_WORD.replace_all(text, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<String> = Vec::new();

    for word in &words {
        if is_noise(word) || is_stopword(word) {
            continue;
        }
        tokens.push(word.to_lowercase());
    }

    // 단어 경계를 넘지 않는 한글 bigram
    for word in &words {
        let chars: Vec<char> = word.chars().collect();
        tokens.extend(
            chars
                .windows(2)
                .filter(|pair| pair.iter().all(|&c| is_syllable(c)))
                .map(|pair| pair.iter().collect::<String>()),
        );
    }

    // 종목 코드, 약어
    for word in &words {
        if word.chars().count() >= 2 && word.chars().all(char::is_alphabetic) {
            tokens.push(word.to_uppercase());
        }
    }

    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| keep(t))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
