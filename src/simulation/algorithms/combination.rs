//! All k-element subsets of a list, in lexicographic order

use super::{format_list, too_large};
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

/// Largest element count traced
pub const MAX_ELEMENTS: usize = 10;

pub fn trace(elements: &[i64], k: i64) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, elements, k, 0, &[]);
    rec.finish()
}

fn run(
    rec: &mut Recorder,
    elements: &[i64],
    k: i64,
    start: usize,
    current: &[i64],
) -> Option<Vec<Vec<i64>>> {
    let function = format!(
        "combination({}, {}, current={})",
        format_list(elements),
        k,
        format_list(current)
    );
    rec.push(&function);

    if k < 0 || k as usize > elements.len() {
        rec.reject(&function, "k must be between 0 and the number of elements");
        return None;
    }
    if elements.len() > MAX_ELEMENTS {
        rec.reject(
            &function,
            too_large("element count", elements.len() as i64, MAX_ELEMENTS as i64),
        );
        return None;
    }

    let k = k as usize;
    if current.len() == k {
        rec.highlight(Keyword::BaseCase, "combination complete");
        rec.finish_call(&function, Outcome::Sequence(current.to_vec()));
        return Some(vec![current.to_vec()]);
    }

    if start >= elements.len() {
        rec.finish_call(&function, Outcome::Sequences(Vec::new()));
        return Some(Vec::new());
    }

    let mut results = Vec::new();
    for (i, &element) in elements.iter().enumerate().skip(start) {
        rec.highlight(Keyword::RecursiveCall, format!("choosing element {}", element));

        let mut next = current.to_vec();
        next.push(element);

        match run(rec, elements, k as i64, i + 1, &next) {
            Some(found) => results.extend(found),
            None => {
                rec.reject(&function, "recursive call failed");
                return None;
            }
        }
    }

    rec.finish_call(&function, Outcome::Sequences(results.clone()));
    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::step::{Step, StepKind};

    #[test]
    fn test_pairs() {
        let root = trace(&[1, 2, 3], 2)
            .filter_map(|s| match s {
                Step::Result { result, .. } => Some(result),
                _ => None,
            })
            .last();
        assert_eq!(
            root,
            Some(Outcome::Sequences(vec![vec![1, 2], vec![1, 3], vec![2, 3]]))
        );
    }

    #[test]
    fn test_every_call_has_one_result() {
        let steps: Vec<Step> = trace(&[1, 2, 3, 4], 3).collect();
        let pushes = steps.iter().filter(|s| s.kind() == StepKind::Push).count();
        let results = steps.iter().filter(|s| s.kind() == StepKind::Result).count();
        assert_eq!(pushes, results);
    }

    #[test]
    fn test_k_too_large_is_rejected() {
        let steps: Vec<Step> = trace(&[1, 2], 3).collect();
        assert_eq!(steps.len(), 3);
    }
}
