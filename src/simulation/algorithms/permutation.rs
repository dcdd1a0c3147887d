//! All orderings of a list of elements

use super::{format_list, too_large};
use crate::simulation::emitter::{Recorder, StepEmitter};
use crate::simulation::step::{Keyword, Outcome};

/// Largest element count traced (5 elements make 326 calls)
pub const MAX_ELEMENTS: usize = 5;

pub fn trace(elements: &[i64]) -> StepEmitter {
    let mut rec = Recorder::new();
    run(&mut rec, elements, &[]);
    rec.finish()
}

fn run(rec: &mut Recorder, elements: &[i64], current: &[i64]) -> Option<Vec<Vec<i64>>> {
    let function = format!(
        "permutation({}, {})",
        format_list(elements),
        format_list(current)
    );
    rec.push(&function);

    if elements.len() > MAX_ELEMENTS {
        rec.reject(
            &function,
            too_large("element count", elements.len() as i64, MAX_ELEMENTS as i64),
        );
        return None;
    }

    if elements.is_empty() {
        rec.highlight(Keyword::BaseCase, "permutation complete");
        rec.finish_call(&function, Outcome::Sequence(current.to_vec()));
        return Some(vec![current.to_vec()]);
    }

    let mut results = Vec::new();
    for (i, &element) in elements.iter().enumerate() {
        rec.highlight(Keyword::RecursiveCall, format!("choosing element {}", element));

        let mut remaining = elements.to_vec();
        remaining.remove(i);
        let mut next = current.to_vec();
        next.push(element);

        match run(rec, &remaining, &next) {
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
    use crate::simulation::step::Step;

    #[test]
    fn test_all_orderings() {
        let root = trace(&[1, 2, 3])
            .filter_map(|s| match s {
                Step::Result { result, .. } => Some(result),
                _ => None,
            })
            .last();
        assert_eq!(
            root,
            Some(Outcome::Sequences(vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]))
        );
    }

    #[test]
    fn test_labels() {
        let first: Vec<String> = trace(&[1, 2])
            .filter_map(|s| match s {
                Step::Push { function } => Some(function),
                _ => None,
            })
            .take(2)
            .collect();
        assert_eq!(first, vec!["permutation([1, 2], [])", "permutation([2], [1])"]);
    }
}
