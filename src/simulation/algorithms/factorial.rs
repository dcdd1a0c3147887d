//! n! = n × (n-1)!

use super::too_large;
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

/// 20! is the largest factorial that fits in an i64
pub const MAX_N: i64 = 20;

pub fn trace(n: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n);
    rec.finish()
}

fn run(rec: &mut Recorder, n: i64) -> Option<i64> {
    let function = format!("factorial({})", n);
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
        rec.finish_call(&function, Outcome::Int(1));
        return Some(1);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!("computing {}! = {} × ({})!", n, n, n - 1),
    );
    let Some(previous) = run(rec, n - 1) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };
    let Some(total) = previous.checked_mul(n) else {
        rec.reject(&function, "arithmetic overflow");
        return None;
    };

    rec.highlight(
        Keyword::Return,
        format!(
            "{}! = {} × ({})! = {} × {} = {}",
            n,
            n,
            n - 1,
            n,
            previous,
            total
        ),
    );
    rec.finish_call(&function, Outcome::Int(total));
    Some(total)
}
