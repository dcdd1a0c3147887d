//! Catalog of traced recursive algorithms
//!
//! Every algorithm follows the same emission protocol: `push`, then
//! highlights for the base-case check and each recursive call interleaved
//! with the nested calls' own events, then one `result` and `pop`. Invalid
//! input short-circuits straight to an error `result` and `pop`.
//!
//! [`Algorithm`] derives a full parameter set from a single integer so the UI
//! only needs one input.

pub mod accumulate;
pub mod binomial;
pub mod combination;
pub mod factorial;
pub mod fibonacci;
pub mod gcd;
pub mod hanoi;
pub mod permutation;
pub mod power;

use super::emitter::{Recorder, StepEmitter};
use super::errors::SimulationError;
use super::step::Keyword;
use std::fmt;
use std::str::FromStr;

pub(crate) fn too_large(what: &str, value: i64, max: i64) -> String {
    format!("{}={} exceeds the supported maximum of {}", what, value, max)
}

pub(crate) fn format_list(items: &[i64]) -> String {
    let inner: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fibonacci,
    Hanoi,
    AccumulateSum,
    AccumulateProduct,
    Factorial,
    Binomial,
    Gcd,
    Power,
    Permutation,
    Combination,
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [
        Algorithm::Fibonacci,
        Algorithm::Hanoi,
        Algorithm::AccumulateSum,
        Algorithm::AccumulateProduct,
        Algorithm::Factorial,
        Algorithm::Binomial,
        Algorithm::Gcd,
        Algorithm::Power,
        Algorithm::Permutation,
        Algorithm::Combination,
    ];

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fibonacci => "fibonacci",
            Algorithm::Hanoi => "hanoi",
            Algorithm::AccumulateSum => "sum",
            Algorithm::AccumulateProduct => "product",
            Algorithm::Factorial => "factorial",
            Algorithm::Binomial => "binomial",
            Algorithm::Gcd => "gcd",
            Algorithm::Power => "power",
            Algorithm::Permutation => "permutation",
            Algorithm::Combination => "combination",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Fibonacci => "Fibonacci",
            Algorithm::Hanoi => "Towers of Hanoi",
            Algorithm::AccumulateSum => "Running Sum",
            Algorithm::AccumulateProduct => "Running Product",
            Algorithm::Factorial => "Factorial",
            Algorithm::Binomial => "Binomial Coefficient",
            Algorithm::Gcd => "Greatest Common Divisor",
            Algorithm::Power => "Power",
            Algorithm::Permutation => "Permutations",
            Algorithm::Combination => "Combinations",
        }
    }

    /// A reasonable starting input for the UI
    pub fn default_n(self) -> i64 {
        match self {
            Algorithm::Fibonacci => 4,
            Algorithm::Hanoi => 3,
            Algorithm::AccumulateSum | Algorithm::AccumulateProduct => 5,
            Algorithm::Factorial => 5,
            Algorithm::Binomial => 5,
            Algorithm::Gcd => 48,
            Algorithm::Power => 3,
            Algorithm::Permutation => 3,
            Algorithm::Combination => 4,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Trace for input `n`; the remaining parameters are derived from it
    pub fn emitter(self, n: i64) -> StepEmitter {
        match self {
            Algorithm::Fibonacci => fibonacci::trace(n),
            Algorithm::Hanoi => hanoi::trace(n, 'A', 'C', 'B'),
            Algorithm::AccumulateSum => accumulate::trace_sum(n),
            Algorithm::AccumulateProduct => accumulate::trace_product(n),
            Algorithm::Factorial => factorial::trace(n),
            Algorithm::Binomial => binomial::trace(n, n / 2),
            Algorithm::Gcd => gcd::trace(n, n / 2),
            Algorithm::Power => power::trace(n, 2),
            Algorithm::Permutation if n > permutation::MAX_ELEMENTS as i64 => {
                oversized(format!("permutation(1..={})", n), n, permutation::MAX_ELEMENTS)
            }
            Algorithm::Permutation => permutation::trace(&elements_up_to(n)),
            Algorithm::Combination if n > combination::MAX_ELEMENTS as i64 => oversized(
                format!("combination(1..={}, {})", n, n / 2),
                n,
                combination::MAX_ELEMENTS,
            ),
            Algorithm::Combination => combination::trace(&elements_up_to(n), n / 2),
        }
    }

    /// Pseudo-code shown beside the tree.
    ///
    /// Lines mentioning a [`Keyword`] label are highlighted when that keyword is hit.
    pub fn source(self) -> &'static str {
        match self {
            Algorithm::Fibonacci => {
                "def fibonacci(n):\n    \
                 # base case: n is 0 or 1\n    \
                 if n <= 1:\n        \
                 return n\n    \
                 # recursive call: two smaller problems\n    \
                 # return: their sum\n    \
                 return fibonacci(n-1) + fibonacci(n-2)"
            }
            Algorithm::Hanoi => {
                "def hanoi(n, source, target, auxiliary):\n    \
                 # base case: a single disk moves directly\n    \
                 if n == 1:\n        \
                 move_disk(source, target)\n        \
                 return\n    \
                 # recursive call: park n-1 disks on auxiliary\n    \
                 hanoi(n-1, source, auxiliary, target)\n    \
                 # move disk: the largest disk goes to target\n    \
                 move_disk(source, target)\n    \
                 # recursive call: bring n-1 disks onto target\n    \
                 hanoi(n-1, auxiliary, target, source)"
            }
            Algorithm::AccumulateSum => {
                "def accumulate_sum(n):\n    \
                 # base case: the empty sum is 0\n    \
                 if n == 0:\n        \
                 return 0\n    \
                 # recursive call: sum of 1..n-1\n    \
                 # return: add n\n    \
                 return accumulate_sum(n-1) + n"
            }
            Algorithm::AccumulateProduct => {
                "def accumulate_product(n):\n    \
                 # base case: the empty product is 1\n    \
                 if n == 0:\n        \
                 return 1\n    \
                 # recursive call: product of 1..n-1\n    \
                 # return: multiply by n\n    \
                 return accumulate_product(n-1) * n"
            }
            Algorithm::Factorial => {
                "def factorial(n):\n    \
                 # base case: 0! = 1! = 1\n    \
                 if n <= 1:\n        \
                 return 1\n    \
                 # recursive call: (n-1)!\n    \
                 # return: n times (n-1)!\n    \
                 return n * factorial(n-1)"
            }
            Algorithm::Binomial => {
                "def binomial(n, k):\n    \
                 # base case: k is 0 or n\n    \
                 if k == 0 or k == n:\n        \
                 return 1\n    \
                 # recursive call: Pascal's rule\n    \
                 # return: sum of both halves\n    \
                 return binomial(n-1, k-1) + binomial(n-1, k)"
            }
            Algorithm::Gcd => {
                "def gcd(a, b):\n    \
                 # base case: b is 0\n    \
                 if b == 0:\n        \
                 return a\n    \
                 # recursive call: Euclid's step\n    \
                 # return: the same divisor\n    \
                 return gcd(b, a % b)"
            }
            Algorithm::Power => {
                "def power(base, exponent):\n    \
                 # base case: exponent is 0\n    \
                 if exponent == 0:\n        \
                 return 1\n    \
                 # recursive call: halve the exponent\n    \
                 half = power(base, exponent // 2)\n    \
                 # return: square, times base when odd\n    \
                 if exponent % 2 == 0:\n        \
                 return half * half\n    \
                 return half * half * base"
            }
            Algorithm::Permutation => {
                "def permutation(elements, current=[]):\n    \
                 # base case: every element is used\n    \
                 if not elements:\n        \
                 return [current]\n    \
                 results = []\n    \
                 for i, elem in enumerate(elements):\n        \
                 remaining = elements[:i] + elements[i+1:]\n        \
                 # recursive call: fix elem, permute the rest\n        \
                 results += permutation(remaining, current + [elem])\n    \
                 return results"
            }
            Algorithm::Combination => {
                "def combination(elements, k, start=0, current=[]):\n    \
                 # base case: k elements chosen\n    \
                 if len(current) == k:\n        \
                 return [current]\n    \
                 if start >= len(elements):\n        \
                 return []\n    \
                 results = []\n    \
                 for i in range(start, len(elements)):\n        \
                 # recursive call: choose elements[i]\n        \
                 results += combination(elements, k, i + 1, current + [elements[i]])\n    \
                 return results"
            }
        }
    }

    /// Zero-based lines of [`source`](Self::source) to highlight for `keyword`
    pub fn highlighted_lines(self, keyword: Keyword) -> Vec<usize> {
        self.source()
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains(keyword.label()))
            .map(|(i, _)| i)
            .collect()
    }
}

fn elements_up_to(n: i64) -> Vec<i64> {
    (1..=n.max(0)).collect()
}

/// Rejects `1..=n` before the list is built
fn oversized(function: String, n: i64, max: usize) -> StepEmitter {
    let mut rec = Recorder::new();
    rec.push(&function);
    rec.reject(&function, too_large("element count", n, max as i64));
    rec.finish()
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Algorithm::ALL
            .into_iter()
            .find(|a| {
                a.name() == wanted
                    || a.title().to_ascii_lowercase().replace(' ', "") == wanted
            })
            .or(match wanted.as_str() {
                "fib" => Some(Algorithm::Fibonacci),
                "accumulatesum" => Some(Algorithm::AccumulateSum),
                "accumulateproduct" => Some(Algorithm::AccumulateProduct),
                _ => None,
            })
            .ok_or_else(|| SimulationError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("fibonacci".parse::<Algorithm>().unwrap(), Algorithm::Fibonacci);
        assert_eq!("Hanoi".parse::<Algorithm>().unwrap(), Algorithm::Hanoi);
        assert_eq!(
            "accumulate_sum".parse::<Algorithm>().unwrap(),
            Algorithm::AccumulateSum
        );
        assert_eq!("towers-of-hanoi".parse::<Algorithm>().unwrap(), Algorithm::Hanoi);
        assert!(matches!(
            "quicksort".parse::<Algorithm>(),
            Err(SimulationError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Algorithm::Combination.next(), Algorithm::Fibonacci);
        assert_eq!(Algorithm::Fibonacci.prev(), Algorithm::Combination);
        for a in Algorithm::ALL {
            assert_eq!(a.next().prev(), a);
        }
    }

    #[test]
    fn test_every_source_marks_base_and_recursive_case() {
        for a in Algorithm::ALL {
            assert!(!a.highlighted_lines(Keyword::BaseCase).is_empty(), "{}", a);
            assert!(!a.highlighted_lines(Keyword::RecursiveCall).is_empty(), "{}", a);
        }
    }

    #[test]
    fn test_oversized_lists_rejected_before_building() {
        use crate::simulation::step::{Outcome, Step};
        let steps: Vec<Step> = Algorithm::Permutation.emitter(i64::MAX).collect();
        assert_eq!(steps.len(), 3);
        let label = format!("permutation(1..={})", i64::MAX);
        assert_eq!(steps[0], Step::Push { function: label.clone() });
        assert_eq!(
            steps[1],
            Step::Result {
                function: label.clone(),
                result: Outcome::Error(too_large("element count", i64::MAX, 5)),
            }
        );
        assert_eq!(steps[2], Step::Pop { function: label });

        let steps: Vec<Step> = Algorithm::Combination.emitter(11).collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].function(), Some("combination(1..=11, 5)"));
        assert!(matches!(&steps[1], Step::Result { result, .. } if result.is_error()));

        // At the cap the full list is still traced
        let steps: Vec<Step> = Algorithm::Combination.emitter(10).collect();
        assert_eq!(
            steps[0].function(),
            Some("combination([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 5, current=[])")
        );
    }

    #[test]
    fn test_default_inputs_produce_values() {
        use crate::simulation::step::Step;
        for a in Algorithm::ALL {
            let last = a.emitter(a.default_n()).last();
            assert!(
                matches!(&last, Some(Step::Pop { .. })),
                "{} did not end with pop",
                a
            );
        }
    }
}
