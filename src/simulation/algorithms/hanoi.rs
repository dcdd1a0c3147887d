//! Towers of Hanoi: move n disks from `source` to `target` using `auxiliary`

use super::too_large;
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Motion, Outcome};

/// Largest disk count traced (2^8 - 1 calls)
pub const MAX_DISKS: i64 = 8;

pub fn trace(n: i64, source: char, target: char, auxiliary: char) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, n, source, target, auxiliary);
    rec.finish()
}

/// Returns the number of moves made
fn run(rec: &mut Recorder, n: i64, source: char, target: char, auxiliary: char) -> Option<u64> {
    let function = format!("hanoi({}, {}, {}, {})", n, source, target, auxiliary);
    rec.push(&function);

    if n <= 0 {
        rec.reject(&function, "disk count must be positive");
        return None;
    }
    if n > MAX_DISKS {
        rec.reject(&function, too_large("disk count", n, MAX_DISKS));
        return None;
    }

    rec.highlight(Keyword::BaseCase, format!("checking disk count n={}", n));

    if n == 1 {
        rec.highlight(
            Keyword::BaseCase,
            format!("moving disk 1 directly from {} to {}", source, target),
        );
        rec.animate(
            format!("disk 1: {} → {}", source, target),
            Motion::Disk {
                disk: 1,
                from: source,
                to: target,
            },
        );
        rec.finish_call(
            &function,
            Outcome::Text(format!("moved disk 1: {} → {}", source, target)),
        );
        return Some(1);
    }

    rec.highlight(
        Keyword::RecursiveCall,
        format!(
            "moving {} disks from {} to {} (using {})",
            n - 1,
            source,
            auxiliary,
            target
        ),
    );
    let before = run(rec, n - 1, source, auxiliary, target);

    let disk = n as u32;
    rec.highlight(
        Keyword::DiskMove,
        format!("moving largest disk {} from {} to {}", disk, source, target),
    );
    rec.animate(
        format!("disk {}: {} → {}", disk, source, target),
        Motion::Disk {
            disk,
            from: source,
            to: target,
        },
    );

    rec.highlight(
        Keyword::RecursiveCall,
        format!(
            "moving {} disks from {} to {} (using {})",
            n - 1,
            auxiliary,
            target,
            source
        ),
    );
    let after = run(rec, n - 1, auxiliary, target, source);

    let (Some(before), Some(after)) = (before, after) else {
        rec.reject(&function, "recursive call failed");
        return None;
    };

    let moves = before + 1 + after;
    rec.finish_call(
        &function,
        Outcome::Text(format!("moved {} disks in {} moves", n, moves)),
    );
    Some(moves)
}
