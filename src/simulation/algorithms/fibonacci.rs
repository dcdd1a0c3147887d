//! fibonacci(n) = fibonacci(n-1) + fibonacci(n-2)

use super::too_large;
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

/// Largest n traced (fibonacci(12) already makes 465 calls)
pub const MAX_N: i64 = 12;

pub fn trace(n: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n);
    rec.finish()
}

fn run(rec: &mut Recorder, n: i64) -> Option<i64> {
    let function = format!("fibonacci({})", n);
    rec.push(&function);

    if n < 0 {
        rec.reject(&function, "negative input");
        return None;
    }
    if n > MAX_N {
        rec.reject(&function, too_large("n", n, MAX_N));
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking n={}", n));
    if n <= 1 {
        rec.finish_call(&function, Outcome::Int(n));
        return Some(n);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!("computing fibonacci({})", n - 1),
    );
    let first = run(rec, n - 1);

    rec.highlight(
        Keyword::RecursiveCall,
        format!("computing fibonacci({})", n - 2),
    );
    let second = run(rec, n - 2);

    let (Some(first), Some(second)) = (first, second) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };

    let total = first + second;
    rec.highlight(
        Keyword::Return,
        format!(
            "fibonacci({}) = fibonacci({}) + fibonacci({}) = {} + {} = {}",
            n,
            n - 1,
            n - 2,
            first,
            second,
            total
        ),
    );
    rec.finish_call(&function, Outcome::Int(total));
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::step::{Step, StepKind};

    fn final_result(steps: &[Step]) -> Option<&Outcome> {
        steps.iter().rev().find_map(|s| match s {
            Step::Result { result, .. } => Some(result),
            _ => None,
        })
    }

    #[test]
    fn test_values() {
        for (n, expected) in [(0, 0), (1, 1), (2, 1), (5, 5), (10, 55)] {
            let steps: Vec<Step> = trace(n).collect();
            assert_eq!(final_result(&steps), Some(&Outcome::Int(expected)), "n={}", n);
        }
    }

    #[test]
    fn test_call_count() {
        // calls(n) = 2 * fib(n + 1) - 1
        let pushes = trace(6)
            .filter(|s| s.kind() == StepKind::Push)
            .count();
        assert_eq!(pushes, 25);
    }

    #[test]
    fn test_base_case_shape() {
        let kinds: Vec<StepKind> = trace(1).map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Push,
                StepKind::Highlight,
                StepKind::Result,
                StepKind::Pop
            ]
        );
    }

    #[test]
    fn test_too_large_is_rejected() {
        let steps: Vec<Step> = trace(MAX_N + 1).collect();
        assert_eq!(steps.len(), 3);
        assert!(matches!(&steps[1], Step::Result { result, .. } if result.is_error()));
    }
}
