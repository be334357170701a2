//! Chien search over the whole multiplicative group
//!
//! σ(α^-p) is evaluated for p = 0 .. n-1 by keeping one running term per
//! nonzero coefficient in log form and stepping term j by α^-j each round.
//! Walking the full field means a locator that does not split into distinct
//! roots is always caught.

use smallvec::SmallVec;

use super::locator::ErrorLocator;
use crate::error::Uncorrectable;
use crate::galois::GaloisField;

/// Running term of σ: log of its current value and the log step per round
#[derive(Debug, Clone, Copy)]
struct Term {
    log: usize,
    step: usize,
}

/// Find every p in 0..n with σ(α^-p) = 0
///
/// Each p is the polynomial degree of an error in the received word. Fails
/// with [`Uncorrectable::RootCountMismatch`] if the number of roots differs
/// from the locator degree.
pub fn find_error_positions(
    field: &GaloisField,
    locator: &ErrorLocator,
) -> Result<Vec<usize>, Uncorrectable> {
    let degree = locator.degree();
    if degree == 0 {
        return Ok(Vec::new());
    }

    let n = field.size() as usize;
    let coefficients = locator.coefficients();
    let constant = coefficients[0];

    let mut terms: SmallVec<[Term; 32]> = SmallVec::new();
    for (j, &c) in coefficients.iter().enumerate().skip(1) {
        if c != 0 {
            terms.push(Term {
                log: field.log(c) as usize,
                step: (n - j % n) % n,
            });
        }
    }

    let mut positions = Vec::with_capacity(degree);
    for p in 0..n {
        let mut sum = constant;
        for term in terms.iter_mut() {
            sum ^= field.exp(term.log);
            term.log += term.step;
            if term.log >= n {
                term.log -= n;
            }
        }

        if sum == 0 {
            positions.push(p);
            if positions.len() > degree {
                break;
            }
        }
    }

    if positions.len() != degree {
        return Err(Uncorrectable::RootCountMismatch {
            degree,
            roots: positions.len(),
        });
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syndromes_for(field: &GaloisField, t: usize, positions: &[usize]) -> Vec<u32> {
        (1..=2 * t)
            .map(|i| {
                positions
                    .iter()
                    .fold(0, |acc, &p| acc ^ field.exp(i * p))
            })
            .collect()
    }

    #[test]
    fn test_trivial_locator_has_no_roots() {
        let gf = GaloisField::with_default_polynomial(8).unwrap();
        let elp = ErrorLocator::solve(&gf, &[0; 6], 3).unwrap();
        assert_eq!(find_error_positions(&gf, &elp).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_finds_positions_in_ascending_order() {
        let gf = GaloisField::with_default_polynomial(13).unwrap();
        let t = 8;
        let errors = [4100, 7, 0, 8190, 333, 2048];
        let syndromes = syndromes_for(&gf, t, &errors);

        let elp = ErrorLocator::solve(&gf, &syndromes, t).unwrap();
        let positions = find_error_positions(&gf, &elp).unwrap();

        let mut expected = errors.to_vec();
        expected.sort_unstable();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_root_count_mismatch() {
        // 1 + x + x^2 has no roots in GF(2^5): its roots live in GF(4)
        let gf = GaloisField::with_default_polynomial(5).unwrap();
        let t = 2;
        // shortest LFSR generating 1, 1, 0, 1 is 1 + x + x^2
        let syndromes = [1, 1, 0, 1];
        let elp = ErrorLocator::solve(&gf, &syndromes, t).unwrap();
        assert_eq!(elp.degree(), 2);

        let err = find_error_positions(&gf, &elp).unwrap_err();
        assert!(matches!(err, Uncorrectable::RootCountMismatch { degree: 2, .. }));
    }
}
