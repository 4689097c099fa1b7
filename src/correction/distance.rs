//! 편집 거리

use std::cmp::min;

/// 단위 비용 Levenshtein 거리 (문자 단위)
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // 두 행만 유지
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = min(min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// 최대 거리 이내일 때만 거리 반환
///
/// 길이 차가 이미 한도를 넘으면 계산하지 않음
pub fn bounded_distance(s1: &str, s2: &str, max: usize) -> Option<usize> {
    if s1.chars().count().abs_diff(s2.chars().count()) > max {
        return None;
    }
    Some(levenshtein_distance(s1, s2)).filter(|&d| d <= max)
}

/// 거리 기반 유사도: `1 - 거리 / 긴 쪽 길이` (둘 다 비면 0)
pub fn levenshtein_similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein_distance(s1, s2) as f64 / max_len as f64
}
