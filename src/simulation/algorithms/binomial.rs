//! C(n, k) = C(n-1, k-1) + C(n-1, k)

use super::too_large;
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

/// Largest n traced (C(10, 5) makes 503 calls)
pub const MAX_N: i64 = 10;

pub fn trace(n: i64, k: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n, k);
    rec.finish()
}

fn run(rec: &mut Recorder, n: i64, k: i64) -> Option<i64> {
    let function = format!("binomial({}, {})", n, k);
    rec.push(&function);

    if n < 0 || k < 0 || k > n {
        rec.reject(&function, "invalid input (need 0 ≤ k ≤ n)");
        return None;
    }
    if n > MAX_N {
        rec.reject(&function, too_large("n", n, MAX_N));
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking n={}, k={}", n, k));
    if k == 0 || k == n {
        rec.finish_call(&function, Outcome::Int(1));
        return Some(1);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!(
            "computing C({},{}) = C({},{}) + C({},{})",
            n,
            k,
            n - 1,
            k - 1,
            n - 1,
            k
        ),
    );
    let left = run(rec, n - 1, k - 1);
    let right = run(rec, n - 1, k);

    let (Some(left), Some(right)) = (left, right) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };

    let total = left + right;
    rec.highlight(
        Keyword::Return,
        format!(
            "C({},{}) = C({},{}) + C({},{}) = {} + {} = {}",
            n,
            k,
            n - 1,
            k - 1,
            n - 1,
            k,
            left,
            right,
            total
        ),
    );
    rec.finish_call(&function, Outcome::Int(total));
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::step::Step;

    #[test]
    fn test_pascal_values() {
        let root = trace(6, 3)
            .filter_map(|s| match s {
                Step::Result { result, .. } => Some(result),
                _ => None,
            })
            .last();
        assert_eq!(root, Some(Outcome::Int(20)));
    }

    #[test]
    fn test_k_greater_than_n_is_rejected() {
        let steps: Vec<Step> = trace(2, 3).collect();
        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[1], Step::Result { result, .. } if result.is_error()));
    }
}
