//! 한글 조합 오토마타
//!
//! 입력이 끝난 영문 키 문자열을 두벌식 IME가 만들었을 한글 문자열로 재조합합니다.
//! 실시간 커서 편집이 아니라 완성된 문자열 재처리만 다룹니다.

use crate::core::keymap::{is_vowel_key, map_key, Jamo};
use crate::core::unicode::{
    combine_tails, combine_vowels, compose_syllable, lead_jamo, tail_to_lead, vowel_jamo,
};

/// 조합 버퍼 상태
///
/// 종성은 항상 초성+중성과 함께만 존재합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// 아무것도 없음
    Empty,
    /// 초성만 입력됨
    Lead(u32),
    /// 초성 없이 모음만 입력됨
    Vowel(u32),
    /// 초성+중성
    LeadVowel(u32, u32),
    /// 초성+중성+종성
    Full(u32, u32, u32),
}

/// 한글 조합 오토마타
pub struct HangulAutomaton {
    state: State,
    output: String,
}

impl HangulAutomaton {
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            output: String::new(),
        }
    }

    /// 자모 하나를 입력하여 상태 전이
    ///
    /// `next_is_vowel`: 바로 다음 입력이 모음인지 여부 (겹받침 판정용 lookahead)
    pub fn feed(&mut self, jamo: Jamo, next_is_vowel: bool) {
        match jamo {
            Jamo::Vowel { vowel } => self.feed_vowel(vowel),
            consonant => self.feed_consonant(consonant, next_is_vowel),
        }
    }

    fn feed_consonant(&mut self, jamo: Jamo, next_is_vowel: bool) {
        let Some(lead) = jamo.lead_index() else {
            return;
        };
        match self.state {
            State::Empty => self.state = State::Lead(lead),
            State::Lead(_) | State::Vowel(_) => {
                self.flush();
                self.state = State::Lead(lead);
            }
            State::LeadVowel(l, v) => match jamo.tail_index() {
                Some(tail) => self.state = State::Full(l, v, tail),
                None => {
                    // ㄸ, ㅃ, ㅉ 는 받침이 될 수 없음
                    self.flush();
                    self.state = State::Lead(lead);
                }
            },
            State::Full(l, v, t) => {
                let combined = jamo
                    .tail_index()
                    .and_then(|tail| combine_tails(t, tail))
                    .filter(|_| !next_is_vowel);
                match combined {
                    Some(tail) => self.state = State::Full(l, v, tail),
                    None => {
                        // 다음 글자가 모음이면 겹받침 대신 새 음절의 초성으로
                        self.flush();
                        self.state = State::Lead(lead);
                    }
                }
            }
        }
    }

    fn feed_vowel(&mut self, vowel: u32) {
        match self.state {
            State::Empty => self.state = State::Vowel(vowel),
            State::Lead(l) => self.state = State::LeadVowel(l, vowel),
            State::Vowel(v) => match combine_vowels(v, vowel) {
                Some(combined) => self.state = State::Vowel(combined),
                None => {
                    self.flush();
                    self.state = State::Vowel(vowel);
                }
            },
            State::LeadVowel(l, v) => match combine_vowels(v, vowel) {
                Some(combined) => self.state = State::LeadVowel(l, combined),
                None => {
                    self.flush();
                    self.state = State::Vowel(vowel);
                }
            },
            State::Full(l, v, t) => match tail_to_lead(t) {
                Some(next_lead) => {
                    // 받침을 다음 음절의 초성으로 넘김
                    self.state = State::LeadVowel(l, v);
                    self.flush();
                    self.state = State::LeadVowel(next_lead, vowel);
                }
                None => {
                    self.flush();
                    self.state = State::Vowel(vowel);
                }
            },
        }
    }

    /// 조합 중인 버퍼를 출력에 확정
    fn flush(&mut self) {
        let emitted = match self.state {
            State::Empty => None,
            State::Lead(l) => lead_jamo(l),
            State::Vowel(v) => vowel_jamo(v),
            State::LeadVowel(l, v) => compose_syllable(l, v, 0),
            State::Full(l, v, t) => compose_syllable(l, v, t),
        };
        if let Some(c) = emitted {
            self.output.push(c);
        }
        self.state = State::Empty;
    }

    /// 자판에 없는 문자: 버퍼를 확정하고 그대로 출력
    pub fn feed_passthrough(&mut self, c: char) {
        self.flush();
        self.output.push(c);
    }

    /// 남은 버퍼를 확정하고 결과 반환
    pub fn finish(mut self) -> String {
        self.flush();
        self.output
    }
}

impl Default for HangulAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

/// 영문 키 문자열을 한글로 재조합
///
/// 자판에 없는 문자는 그대로 유지되며, 실패하는 경우는 없습니다.
pub fn transliterate(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut automaton = HangulAutomaton::new();

    for (i, &c) in chars.iter().enumerate() {
        match map_key(c) {
            Some(jamo) => {
                let next_is_vowel = chars.get(i + 1).is_some_and(|&n| is_vowel_key(n));
                automaton.feed(jamo, next_is_vowel);
            }
            None => automaton.feed_passthrough(c),
        }
    }

    automaton.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_syllable() {
        assert_eq!(transliterate("rk"), "가");
        assert_eq!(transliterate("sk"), "나");
        assert_eq!(transliterate("tkatjd"), "삼성");
    }

    #[test]
    fn test_with_tail() {
        assert_eq!(transliterate("rkr"), "각");
        assert_eq!(transliterate("gks"), "한");
        assert_eq!(transliterate("gkssk"), "한나");
    }

    #[test]
    fn test_resyllabification() {
        assert_eq!(transliterate("rksk"), "가나");
        assert_eq!(transliterate("gktpdy"), "하세요");
        assert_eq!(transliterate("dldi"), "이야");
        assert_eq!(transliterate("rkrkrl"), "가가기");
    }

    #[test]
    fn test_diphthong() {
        assert_eq!(transliterate("dhk"), "와");
        assert_eq!(transliterate("dnj"), "워");
        assert_eq!(transliterate("dml"), "의");
        assert_eq!(transliterate("dhksfy"), "완료");
    }

    #[test]
    fn test_compound_tail() {
        assert_eq!(transliterate("dkfr"), "앍");
        assert_eq!(transliterate("dlfrdj"), "읽어");
        assert_eq!(transliterate("qkfqek"), "밟다");
    }

    #[test]
    fn test_compound_tail_blocked_by_following_vowel() {
        // ㄹ + ㄱ 뒤에 모음이 오면 겹받침을 만들지 않음
        assert_eq!(transliterate("EKfrl"), "딸기");
        assert_eq!(transliterate("dlfrj"), "일거");
    }

    #[test]
    fn test_lead_only_consonant_cannot_be_tail() {
        assert_eq!(transliterate("rkEk"), "가따");
        assert_eq!(transliterate("rkQ"), "가ㅃ");
    }

    #[test]
    fn test_double_consonant() {
        assert_eq!(transliterate("Rk"), "까");
        assert_eq!(transliterate("Tks"), "싼");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(transliterate("123"), "123");
        assert_eq!(transliterate("rk!sk"), "가!나");
        assert_eq!(transliterate("rk sk"), "가 나");
        assert_eq!(transliterate("삼성"), "삼성");
    }

    #[test]
    fn test_consonant_only() {
        assert_eq!(transliterate("r"), "ㄱ");
        assert_eq!(transliterate("rsg"), "ㄱㄴㅎ");
    }

    #[test]
    fn test_vowel_only() {
        assert_eq!(transliterate("k"), "ㅏ");
        assert_eq!(transliterate("kh"), "ㅏㅗ");
        assert_eq!(transliterate("hk"), "ㅘ");
        assert_eq!(transliterate("kr"), "ㅏㄱ");
    }

    #[test]
    fn test_vowel_after_lead_less_vowel_then_consonant() {
        // 모음 단독 버퍼 뒤의 자음은 새 음절을 시작
        assert_eq!(transliterate("krk"), "ㅏ가");
    }

    #[test]
    fn test_deterministic() {
        let input = "dkssudgktpdy tpdy!";
        assert_eq!(transliterate(input), transliterate(input));
        assert_eq!(transliterate(input), "안녕하세요 세요!");
    }

    #[test]
    fn test_empty() {
        assert_eq!(transliterate(""), "");
    }
}
