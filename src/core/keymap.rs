//! 두벌식 자판 키 -> 한글 자모 매핑
//!
//! 키 하나는 정확히 하나의 자모로 매핑됩니다.
//! Shift 조합이 별도 자모를 갖지 않는 키(A, S, X ...)는 소문자와 같은 자모를 냅니다.

/// 자모 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jamo {
    /// 초성 전용 자음 (ㄸ, ㅃ, ㅉ)
    Lead { lead: u32 },
    /// 초성과 종성 모두 가능한 자음
    LeadTail { lead: u32, tail: u32 },
    /// 모음
    Vowel { vowel: u32 },
}

impl Jamo {
    /// 초성 인덱스 (자음인 경우만)
    pub fn lead_index(&self) -> Option<u32> {
        match self {
            Jamo::Lead { lead } | Jamo::LeadTail { lead, .. } => Some(*lead),
            Jamo::Vowel { .. } => None,
        }
    }

    /// 종성 인덱스 (종성 가능한 자음인 경우만)
    pub fn tail_index(&self) -> Option<u32> {
        match self {
            Jamo::LeadTail { tail, .. } => Some(*tail),
            _ => None,
        }
    }

    /// 중성 인덱스 (모음인 경우만)
    pub fn vowel_index(&self) -> Option<u32> {
        match self {
            Jamo::Vowel { vowel } => Some(*vowel),
            _ => None,
        }
    }

    pub fn is_consonant(&self) -> bool {
        !self.is_vowel()
    }

    pub fn is_vowel(&self) -> bool {
        matches!(self, Jamo::Vowel { .. })
    }
}

const fn both(lead: u32, tail: u32) -> Option<Jamo> {
    Some(Jamo::LeadTail { lead, tail })
}

const fn lead_only(lead: u32) -> Option<Jamo> {
    Some(Jamo::Lead { lead })
}

const fn vowel(vowel: u32) -> Option<Jamo> {
    Some(Jamo::Vowel { vowel })
}

/// 키 문자 하나를 자모로 변환
/// 자판에 없는 문자(숫자, 공백, 한글 등)는 None
pub fn map_key(c: char) -> Option<Jamo> {
    // 초성: ㄱ(0) ㄲ(1) ㄴ(2) ㄷ(3) ㄸ(4) ㄹ(5) ㅁ(6) ㅂ(7) ㅃ(8) ㅅ(9)
    //      ㅆ(10) ㅇ(11) ㅈ(12) ㅉ(13) ㅊ(14) ㅋ(15) ㅌ(16) ㅍ(17) ㅎ(18)
    // 종성: ㄱ(1) ㄲ(2) ㄴ(4) ㄷ(7) ㄹ(8) ㅁ(16) ㅂ(17) ㅅ(19) ㅆ(20)
    //      ㅇ(21) ㅈ(22) ㅊ(23) ㅋ(24) ㅌ(25) ㅍ(26) ㅎ(27)
    // 중성: ㅏ(0) ㅐ(1) ㅑ(2) ㅒ(3) ㅓ(4) ㅔ(5) ㅕ(6) ㅖ(7) ㅗ(8)
    //      ㅛ(12) ㅜ(13) ㅠ(17) ㅡ(18) ㅣ(20)
    match c {
        'r' => both(0, 1),        // ㄱ
        'R' => both(1, 2),        // ㄲ
        's' | 'S' => both(2, 4),  // ㄴ
        'e' => both(3, 7),        // ㄷ
        'E' => lead_only(4),      // ㄸ
        'f' | 'F' => both(5, 8),  // ㄹ
        'a' | 'A' => both(6, 16), // ㅁ
        'q' => both(7, 17),       // ㅂ
        'Q' => lead_only(8),      // ㅃ
        't' => both(9, 19),       // ㅅ
        'T' => both(10, 20),      // ㅆ
        'd' | 'D' => both(11, 21), // ㅇ
        'w' => both(12, 22),      // ㅈ
        'W' => lead_only(13),     // ㅉ
        'c' | 'C' => both(14, 23), // ㅊ
        'z' | 'Z' => both(15, 24), // ㅋ
        'x' | 'X' => both(16, 25), // ㅌ
        'v' | 'V' => both(17, 26), // ㅍ
        'g' | 'G' => both(18, 27), // ㅎ

        'k' | 'K' => vowel(0),  // ㅏ
        'o' => vowel(1),        // ㅐ
        'i' | 'I' => vowel(2),  // ㅑ
        'O' => vowel(3),        // ㅒ
        'j' | 'J' => vowel(4),  // ㅓ
        'p' => vowel(5),        // ㅔ
        'u' | 'U' => vowel(6),  // ㅕ
        'P' => vowel(7),        // ㅖ
        'h' | 'H' => vowel(8),  // ㅗ
        'y' | 'Y' => vowel(12), // ㅛ
        'n' | 'N' => vowel(13), // ㅜ
        'b' | 'B' => vowel(17), // ㅠ
        'm' | 'M' => vowel(18), // ㅡ
        'l' | 'L' => vowel(20), // ㅣ

        _ => None,
    }
}

/// 키가 모음 자모로 매핑되는지 확인
pub fn is_vowel_key(c: char) -> bool {
    matches!(map_key(c), Some(Jamo::Vowel { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consonant_mapping() {
        assert_eq!(map_key('r'), Some(Jamo::LeadTail { lead: 0, tail: 1 }));
        assert_eq!(map_key('T'), Some(Jamo::LeadTail { lead: 10, tail: 20 }));
        assert_eq!(map_key('g'), Some(Jamo::LeadTail { lead: 18, tail: 27 }));
        // 종성 불가 쌍자음
        assert_eq!(map_key('E'), Some(Jamo::Lead { lead: 4 }));
        assert_eq!(map_key('Q'), Some(Jamo::Lead { lead: 8 }));
        assert_eq!(map_key('W'), Some(Jamo::Lead { lead: 13 }));
    }

    #[test]
    fn test_shift_without_own_jamo() {
        assert_eq!(map_key('A'), map_key('a'));
        assert_eq!(map_key('X'), map_key('x'));
        assert_eq!(map_key('K'), map_key('k'));
        assert_ne!(map_key('O'), map_key('o'));
        assert_ne!(map_key('P'), map_key('p'));
    }

    #[test]
    fn test_every_letter_is_mapped() {
        for c in ('a'..='z').chain('A'..='Z') {
            assert!(map_key(c).is_some(), "{} should map", c);
        }
    }

    #[test]
    fn test_unmapped_characters() {
        assert!(map_key('1').is_none());
        assert!(map_key(' ').is_none());
        assert!(map_key('가').is_none());
    }

    #[test]
    fn test_jamo_methods() {
        let consonant = map_key('r').unwrap();
        assert_eq!(consonant.lead_index(), Some(0));
        assert_eq!(consonant.tail_index(), Some(1));
        assert_eq!(consonant.vowel_index(), None);
        assert!(consonant.is_consonant());

        let lead = map_key('E').unwrap();
        assert_eq!(lead.tail_index(), None);

        let v = map_key('k').unwrap();
        assert_eq!(v.vowel_index(), Some(0));
        assert!(v.is_vowel());
        assert!(is_vowel_key('k'));
        assert!(!is_vowel_key('r'));
    }
}
