//! Fast exponentiation by squaring

use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

pub fn trace(base: i64, exponent: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, base, exponent);
    rec.finish()
}

fn run(rec: &mut Recorder, base: i64, exponent: i64) -> Option<i64> {
    let function = format!("power({}, {})", base, exponent);
    rec.push(&function);

    if exponent < 0 {
        rec.reject(&function, "negative exponent");
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking exponent {}", exponent));
    if exponent == 0 {
        rec.finish_call(&function, Outcome::Int(1));
        return Some(1);
    }

    let even = exponent % 2 == 0;
    rec.highlight(
        Keyword::RecursiveCall,
        format!(
            "exponent is {}, computing power({}, {})",
            if even { "even" } else { "odd" },
            base,
            exponent / 2
        ),
    );
    let Some(half) = run(rec, base, exponent / 2) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };

    let squared = half.checked_mul(half);
    let total = if even {
        squared
    } else {
        squared.and_then(|s| s.checked_mul(base))
    };
    let Some(total) = total else {
        rec.reject(&function, "arithmetic overflow");
        return None;
    };

    let message = if even {
        format!(
            "{}^{} = ({}^{})^2 = {}^2 = {}",
            base,
            exponent,
            base,
            exponent / 2,
            half,
            total
        )
    } else {
        format!(
            "{}^{} = ({}^{})^2 × {} = {}^2 × {} = {}",
            base,
            exponent,
            base,
            exponent / 2,
            base,
            half,
            base,
            total
        )
    };
    rec.highlight(Keyword::Return, message);
    rec.finish_call(&function, Outcome::Int(total));
    Some(total)
}
