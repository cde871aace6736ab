use serde::{Deserialize, Serialize};

/// Fixed-length vector produced by the embedding gateway for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    pub fn new(vec: Vec<f32>) -> Self {
        Self(vec)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cosine similarity in `[-1, 1]`. Mismatched, empty or zero vectors score 0.
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return 0.0;
        }

        let (dot, norm_a, norm_b) = self
            .0
            .iter()
            .zip(other.0.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (a, b)| {
                (dot + a * b, na + a * a, nb + b * b)
            });

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let score = dot / (norm_a.sqrt() * norm_b.sqrt());
        if score.is_nan() {
            0.0
        } else {
            score
        }
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vec: Vec<f32>) -> Self {
        Self(vec)
    }
}

impl From<Vec<f64>> for Embedding {
    fn from(vec: Vec<f64>) -> Self {
        Self(vec.into_iter().map(|x| x as f32).collect())
    }
}
