//! Running sum and running product of 1..=n

use super::too_large;
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

pub const MAX_SUM_N: i64 = 50;
/// 20! is the largest product that fits in an i64
pub const MAX_PRODUCT_N: i64 = 20;

pub fn trace_sum(n: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n, &Accumulator::Sum);
    rec.finish()
}

pub fn trace_product(n: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n, &Accumulator::Product);
    rec.finish()
}

enum Accumulator {
    Sum,
    Product,
}

impl Accumulator {
    fn name(&self) -> &'static str {
        match self {
            Accumulator::Sum => "accumulate_sum",
            Accumulator::Product => "accumulate_product",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Accumulator::Sum => "+",
            Accumulator::Product => "×",
        }
    }

    fn identity(&self) -> i64 {
        match self {
            Accumulator::Sum => 0,
            Accumulator::Product => 1,
        }
    }

    fn max_n(&self) -> i64 {
        match self {
            Accumulator::Sum => MAX_SUM_N,
            Accumulator::Product => MAX_PRODUCT_N,
        }
    }

    fn combine(&self, acc: i64, n: i64) -> Option<i64> {
        match self {
            Accumulator::Sum => acc.checked_add(n),
            Accumulator::Product => acc.checked_mul(n),
        }
    }
}

fn run(rec: &mut Recorder, n: i64, acc: &Accumulator) -> Option<i64> {
    let name = acc.name();
    let function = format!("{}({})", name, n);
    rec.push(&function);

    if n < 0 {
        rec.reject(&function, "negative input");
        return None;
    }
    if n > acc.max_n() {
        rec.reject(&function, too_large("n", n, acc.max_n()));
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking n={}", n));
    if n == 0 {
        let value = acc.identity();
        rec.finish_call(&function, Outcome::Int(value));
        return Some(value);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!("computing {}({}) {} {}", name, n - 1, acc.symbol(), n),
    );
    let Some(previous) = run(rec, n - 1, acc) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };
    let Some(total) = acc.combine(previous, n) else {
        rec.reject(&function, "arithmetic overflow");
        return None;
    };

    rec.highlight(
        Keyword::Return,
        format!(
            "{}({}) = {}({}) {} {} = {} {} {} = {}",
            name,
            n,
            name,
            n - 1,
            acc.symbol(),
            n,
            previous,
            acc.symbol(),
            n,
            total
        ),
    );
    rec.finish_call(&function, Outcome::Int(total));
    Some(total)
}
