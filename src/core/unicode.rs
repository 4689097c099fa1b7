//! 유니코드 한글 음절 조합/분해와 호환용 자모 테이블

use std::ops::RangeInclusive;

/// 한글 음절 시작 코드포인트 (가)
const SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
const SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
pub const LEAD_COUNT: u32 = 19;
/// 중성 개수
pub const VOWEL_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
pub const TAIL_COUNT: u32 = 28;

/// 호환용 자음 영역 (ㄱ ~ ㅎ, 겹받침 포함)
pub const CONSONANT_JAMO_RANGE: RangeInclusive<char> = 'ㄱ'..='ㅎ';

/// 초성 인덱스 순서의 호환용 자모
#[rustfmt::skip]
const LEAD_JAMO: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 중성 인덱스 순서의 호환용 자모
#[rustfmt::skip]
const VOWEL_JAMO: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ',
    'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// 종성 인덱스 순서의 호환용 자모 (0 = 종성 없음)
#[rustfmt::skip]
const TAIL_JAMO: [Option<char>; 28] = [
    None, Some('ㄱ'), Some('ㄲ'), Some('ㄳ'), Some('ㄴ'), Some('ㄵ'), Some('ㄶ'),
    Some('ㄷ'), Some('ㄹ'), Some('ㄺ'), Some('ㄻ'), Some('ㄼ'), Some('ㄽ'), Some('ㄾ'),
    Some('ㄿ'), Some('ㅀ'), Some('ㅁ'), Some('ㅂ'), Some('ㅄ'), Some('ㅅ'), Some('ㅆ'),
    Some('ㅇ'), Some('ㅈ'), Some('ㅊ'), Some('ㅋ'), Some('ㅌ'), Some('ㅍ'), Some('ㅎ'),
];

/// 초성/중성/종성 인덱스로 완성형 음절 생성
///
/// `base + lead × 21 × 28 + vowel × 28 + tail`
/// 범위를 벗어난 인덱스는 None
pub fn compose_syllable(lead: u32, vowel: u32, tail: u32) -> Option<char> {
    if lead >= LEAD_COUNT || vowel >= VOWEL_COUNT || tail >= TAIL_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (lead * VOWEL_COUNT + vowel) * TAIL_COUNT + tail)
}

/// 완성형 음절을 (초성, 중성, 종성) 인덱스로 분해
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    let code = c as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let offset = code - SYLLABLE_BASE;
    let tail = offset % TAIL_COUNT;
    let vowel = (offset / TAIL_COUNT) % VOWEL_COUNT;
    let lead = offset / (VOWEL_COUNT * TAIL_COUNT);
    Some((lead, vowel, tail))
}

/// 완성형 한글(가-힣)인지 확인
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// 호환용 자음 자모(ㄱ-ㅎ)인지 확인
pub fn is_consonant_jamo(c: char) -> bool {
    CONSONANT_JAMO_RANGE.contains(&c)
}

/// 두 중성을 복합 모음으로 조합
pub fn combine_vowels(first: u32, second: u32) -> Option<u32> {
    match (first, second) {
        (8, 0) => Some(9),    // ㅗ + ㅏ = ㅘ
        (8, 1) => Some(10),   // ㅗ + ㅐ = ㅙ
        (8, 20) => Some(11),  // ㅗ + ㅣ = ㅚ
        (13, 4) => Some(14),  // ㅜ + ㅓ = ㅝ
        (13, 5) => Some(15),  // ㅜ + ㅔ = ㅞ
        (13, 20) => Some(16), // ㅜ + ㅣ = ㅟ
        (18, 20) => Some(19), // ㅡ + ㅣ = ㅢ
        _ => None,
    }
}

/// 두 종성을 겹받침으로 조합
pub fn combine_tails(first: u32, second: u32) -> Option<u32> {
    match (first, second) {
        (1, 19) => Some(3),   // ㄱ + ㅅ = ㄳ
        (4, 22) => Some(5),   // ㄴ + ㅈ = ㄵ
        (4, 27) => Some(6),   // ㄴ + ㅎ = ㄶ
        (8, 1) => Some(9),    // ㄹ + ㄱ = ㄺ
        (8, 16) => Some(10),  // ㄹ + ㅁ = ㄻ
        (8, 17) => Some(11),  // ㄹ + ㅂ = ㄼ
        (8, 19) => Some(12),  // ㄹ + ㅅ = ㄽ
        (8, 25) => Some(13),  // ㄹ + ㅌ = ㄾ
        (8, 26) => Some(14),  // ㄹ + ㅍ = ㄿ
        (8, 27) => Some(15),  // ㄹ + ㅎ = ㅀ
        (17, 19) => Some(18), // ㅂ + ㅅ = ㅄ
        _ => None,
    }
}

/// 종성을 초성 인덱스로 변환 (초성이 될 수 없는 겹받침은 None)
pub fn tail_to_lead(tail: u32) -> Option<u32> {
    let jamo = TAIL_JAMO.get(tail as usize).copied().flatten()?;
    LEAD_JAMO.iter().position(|&c| c == jamo).map(|i| i as u32)
}

/// 초성 인덱스 -> 호환용 자모
pub fn lead_jamo(lead: u32) -> Option<char> {
    LEAD_JAMO.get(lead as usize).copied()
}

/// 중성 인덱스 -> 호환용 자모
pub fn vowel_jamo(vowel: u32) -> Option<char> {
    VOWEL_JAMO.get(vowel as usize).copied()
}

/// 종성 인덱스 -> 호환용 자모
pub fn tail_jamo(tail: u32) -> Option<char> {
    TAIL_JAMO.get(tail as usize).copied().flatten()
}
