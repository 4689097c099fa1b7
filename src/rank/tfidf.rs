//! TF-IDF 벡터 공간
//!
//! 호출마다 질의와 후보 문서 전체로 새 어휘를 만듭니다.
//! idf는 평활화된 `ln((1+n)/(1+df)) + 1`, 벡터는 L2 정규화합니다.

use std::collections::{BTreeMap, HashMap};

/// 희소 벡터 (특성 인덱스 오름차순)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// 코사인 유사도 (영벡터가 끼면 0)
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
}

impl TfidfVectorizer {
    pub fn new(max_features: Option<usize>) -> Self {
        Self { max_features }
    }

    /// 토큰 목록들로 어휘를 만들고 각 문서를 벡터로
    pub fn fit_transform(&self, docs: &[Vec<String>]) -> Vec<SparseVector> {
        let counts: Vec<HashMap<&str, usize>> = docs
            .iter()
            .map(|tokens| {
                let mut tf = HashMap::new();
                for t in tokens {
                    *tf.entry(t.as_str()).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let vocabulary = self.vocabulary(&counts);
        let n = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .values()
            .map(|&(_, df)| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let index: HashMap<&str, usize> = vocabulary
            .keys()
            .enumerate()
            .map(|(i, term)| (*term, i))
            .collect();

        counts
            .iter()
            .map(|tf| {
                let mut entries: Vec<(usize, f64)> = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        index.get(term).map(|&i| (i, count as f64 * idf[i]))
                    })
                    .collect();
                entries.sort_by_key(|&(i, _)| i);
                let mut vector = SparseVector { entries };
                let norm = vector.norm();
                if norm > 0.0 {
                    for (_, w) in &mut vector.entries {
                        *w /= norm;
                    }
                }
                vector
            })
            .collect()
    }

    /// 사전순 어휘 → (전체 빈도, 문서 빈도)
    ///
    /// `max_features`를 넘으면 전체 빈도 상위만 남김 (동률은 사전순)
    fn vocabulary<'a>(&self, counts: &[HashMap<&'a str, usize>]) -> BTreeMap<&'a str, (usize, usize)> {
        let mut vocab: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in counts {
            for (&term, &count) in tf {
                let entry = vocab.entry(term).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        match self.max_features {
            Some(limit) if vocab.len() > limit => {
                let mut ranked: Vec<(&str, (usize, usize))> = vocab.into_iter().collect();
                // 사전순으로 들어와 있으므로 안정 정렬이면 동률은 사전순 유지
                ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
                ranked.truncate(limit);
                ranked.into_iter().collect()
            }
            _ => vocab,
        }
    }
}
