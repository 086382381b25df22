//! Distance computation for embeddings.

use crate::error::{EmbeddingError, Result};

/// Compute the Euclidean (L2) distance between two embeddings.
///
/// No normalization or weighting is applied.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(l2(a, b))
}

/// Euclidean distance for slices already known to share a length.
pub(crate) fn l2(a: &[f32], b: &[f32]) -> f32 {
    let sum: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();

    sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_euclidean_distance_identical() {
        let a = vec![0.25, -1.5, 3.0];
        assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_euclidean_distance_unit() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 1.0);
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_euclidean_distance_diagonal() {
        let d = euclidean_distance(&[0.0, 0.0], &[5.0, 5.0]).unwrap();
        assert!((d - 7.071_068).abs() < 1e-5);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            euclidean_distance(&[0.0, 0.0], &[3.0]),
            Err(EmbeddingError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(euclidean_distance(&[], &[1.0]).is_err());
    }

    #[test]
    fn test_euclidean_distance_symmetric() {
        let vectors: Vec<Vec<f32>> = vec![
            vec![0.1, 0.7, -0.3, 2.2],
            vec![-0.9, 0.4, 1.3, 0.0],
            vec![1e-3, -4.5, 0.25, 7.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![3.3, 3.3, -3.3, 1e4],
        ];

        for a in &vectors {
            for b in &vectors {
                assert_eq!(
                    euclidean_distance(a, b).unwrap().to_bits(),
                    euclidean_distance(b, a).unwrap().to_bits()
                );
            }
        }
    }
}
