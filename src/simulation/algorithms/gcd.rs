//! Euclid's algorithm: gcd(a, b) = gcd(b, a mod b)

use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

pub fn trace(a: i64, b: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, a, b);
    rec.finish()
}

fn run(rec: &mut Recorder, a: i64, b: i64) -> Option<i64> {
    let function = format!("gcd({}, {})", a, b);
    rec.push(&function);

    if a < 0 || b < 0 {
        rec.reject(&function, "negative input");
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking b={}", b));
    if b == 0 {
        rec.finish_call(&function, Outcome::Int(a));
        return Some(a);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!("computing gcd({}, {} mod {})", b, a, b),
    );
    let Some(result) = run(rec, b, a % b) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };

    rec.highlight(
        Keyword::Return,
        format!("gcd({}, {}) = gcd({}, {} mod {}) = {}", a, b, b, a, b, result),
    );
    rec.finish_call(&function, Outcome::Int(result));
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::step::Step;

    #[test]
    fn test_euclid() {
        let labels: Vec<String> = trace(48, 18)
            .filter_map(|s| match s {
                Step::Push { function } => Some(function),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec!["gcd(48, 18)", "gcd(18, 12)", "gcd(12, 6)", "gcd(6, 0)"]
        );
    }
}
