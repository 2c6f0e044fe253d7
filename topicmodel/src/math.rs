//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::iter::Map;
use std::slice::Iter;
use itertools::Itertools;
use statrs::function::gamma::{digamma, ln_gamma};

// src: https://github.com/piskvorky/gensim/blob/develop/gensim/_matutils.pyx

/// E[log X] for X ~ Dir(alphas)
pub(crate) fn dirichlet_expectation_1d<'a>(alphas: &'a [f64]) -> Map<Iter<'a, f64>, impl FnMut(&'a f64) -> f64 + 'a> {
    let psi_sum_alpha = digamma(alphas.iter().sum());
    alphas.iter().map(move |alpha| digamma(*alpha) - psi_sum_alpha)
}

/// exp(E[log X]) for X ~ Dir(alphas)
pub(crate) fn exp_dirichlet_expectation(alphas: &[f64]) -> Vec<f64> {
    dirichlet_expectation_1d(alphas).map(f64::exp).collect()
}

pub(crate) fn exp_dirichlet_expectation_2d(alphas: &[Vec<f64>]) -> Vec<Vec<f64>> {
    alphas.iter().map(|row| exp_dirichlet_expectation(row)).collect()
}

/// Scales the values to a sum of 1. A zero row becomes uniform.
pub(crate) fn normalized(values: &[f64]) -> Vec<f64> {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        values.iter().map(|value| value / sum).collect()
    } else {
        vec![1.0 / values.len() as f64; values.len()]
    }
}

pub(crate) fn mean_absolute_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip_eq(b.iter()).map(|(a, b)| (a - b).abs()).sum::<f64>() / a.len() as f64
}

/// log(sum(exp(values))) without overflowing.
pub(crate) fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|value| (value - max).exp()).sum::<f64>().ln()
}

/// The part of the variational bound contributed by a Dirichlet with
/// prior `prior` and posterior `posterior`, for a given E[log X].
pub(crate) fn dirichlet_bound(prior: f64, posterior: &[f64], e_log: &[f64]) -> f64 {
    let len = posterior.len() as f64;
    let mut score = posterior
        .iter()
        .zip_eq(e_log.iter())
        .map(|(p, e)| (prior - p) * e + ln_gamma(*p) - ln_gamma(prior))
        .sum::<f64>();
    score += ln_gamma(prior * len) - ln_gamma(posterior.iter().sum());
    score
}


#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn dirichlet_expectation_matches_digamma(){
        let values = dirichlet_expectation_1d(&[1.0, 1.0]).collect_vec();
        // digamma(1) - digamma(2) = -1
        assert_relative_eq!(-1.0, values[0], epsilon = 1e-9);
        assert_relative_eq!(-1.0, values[1], epsilon = 1e-9);
        let exp = exp_dirichlet_expectation(&[1.0, 1.0]);
        assert_relative_eq!((-1.0f64).exp(), exp[0], epsilon = 1e-9);
    }

    #[test]
    fn normalizes_rows(){
        let row = normalized(&[1.0, 3.0]);
        assert_relative_eq!(0.25, row[0]);
        assert_relative_eq!(0.75, row[1]);
        assert_eq!(vec![0.5, 0.5], normalized(&[0.0, 0.0]));
    }

    #[test]
    fn log_sum_exp_is_stable(){
        assert_relative_eq!(1000.0 + 2f64.ln(), log_sum_exp(&[1000.0, 1000.0]), epsilon = 1e-9);
        assert_relative_eq!(3f64.ln(), log_sum_exp(&[0.0, 0.0, 0.0]), epsilon = 1e-12);
    }

    #[test]
    fn mean_difference(){
        assert_relative_eq!(1.0, mean_absolute_difference(&[1.0, 2.0], &[2.0, 1.0]));
    }
}
