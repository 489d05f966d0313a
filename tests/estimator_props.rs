//! Property tests for arm draws and estimator updates.

use banditry::{ArmModel, BetaPosterior, BetaPrior, Estimator};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    /// Rectified Gaussian rewards are never negative, whatever the mean.
    #[test]
    fn gaussian_draw_is_non_negative(mean in -50.0f64..50.0, seed in any::<u64>()) {
        let arm = ArmModel::gaussian(mean).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..64 {
            let r = arm.draw(&mut rng);
            prop_assert!(r >= 0.0 && r.is_finite(), "r={}", r);
        }
    }

    /// Bernoulli rewards are exactly 0 or 1.
    #[test]
    fn bernoulli_draw_is_binary(p in 0.0f64..=1.0, seed in any::<u64>()) {
        let arm = ArmModel::bernoulli(p).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..64 {
            let r = arm.draw(&mut rng);
            prop_assert!(r == 0.0 || r == 1.0, "r={}", r);
        }
    }

    /// The streaming mean equals the batch mean, even when updates to two
    /// estimators are interleaved.
    #[test]
    fn running_mean_equals_arithmetic_mean(
        steps in proptest::collection::vec((any::<bool>(), 0.0f64..100.0), 1..200),
    ) {
        let mut a = Estimator::sample_average();
        let mut b = Estimator::sample_average();
        let (mut seen_a, mut seen_b) = (Vec::new(), Vec::new());
        for (to_a, r) in steps {
            if to_a {
                a.update(r);
                seen_a.push(r);
            } else {
                b.update(r);
                seen_b.push(r);
            }
        }
        for (est, seen) in [(a, seen_a), (b, seen_b)] {
            prop_assert_eq!(est.observations(), seen.len() as u64);
            if seen.is_empty() {
                prop_assert_eq!(est.point_estimate(), 0.0);
            } else {
                let batch = seen.iter().sum::<f64>() / seen.len() as f64;
                prop_assert!((est.point_estimate() - batch).abs() < 1e-9,
                    "streaming={} batch={}", est.point_estimate(), batch);
            }
        }
    }

    /// Optimistic and zero-initialized estimators agree once both have seen data.
    #[test]
    fn optimistic_initial_value_is_forgotten_after_first_update(
        q0 in 0.0f64..1_000.0,
        rewards in proptest::collection::vec(0.0f64..10.0, 1..50),
    ) {
        let mut plain = Estimator::sample_average();
        let mut opt = Estimator::optimistic(q0).unwrap();
        for &r in &rewards {
            plain.update(r);
            opt.update(r);
        }
        prop_assert!((plain.point_estimate() - opt.point_estimate()).abs() < 1e-6);
    }

    /// After k straight successes the posterior mean strictly increases in k.
    #[test]
    fn posterior_mean_increases_with_successes(
        alpha0 in 0.1f64..10.0,
        beta0 in 0.1f64..10.0,
        k in 0usize..200,
    ) {
        let mut p = BetaPosterior::new(BetaPrior::new(alpha0, beta0).unwrap());
        let mut prev = p.mean();
        for i in 0..k {
            p.update(1.0);
            let expected = (alpha0 + (i + 1) as f64) / (alpha0 + beta0 + (i + 1) as f64);
            prop_assert!((p.mean() - expected).abs() < 1e-12);
            prop_assert!(p.mean() > prev);
            prop_assert!(p.mean() < 1.0);
            prev = p.mean();
        }
    }

    /// `observations` counts every update, for every variant.
    #[test]
    fn observation_count_tracks_updates(n in 0usize..100, reward in 0.0f64..=1.0) {
        for mut e in [Estimator::sample_average(), Estimator::optimistic(5.0).unwrap(), Estimator::beta()] {
            for _ in 0..n {
                e.update(reward);
            }
            prop_assert_eq!(e.observations(), n as u64);
        }
    }

    /// Thompson draws stay inside the unit interval.
    #[test]
    fn thompson_draws_are_probabilities(
        outcomes in proptest::collection::vec(any::<bool>(), 0..100),
        seed in any::<u64>(),
    ) {
        let mut e = Estimator::beta();
        for o in outcomes {
            e.update(if o { 1.0 } else { 0.0 });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..16 {
            let x = e.sample(&mut rng);
            prop_assert!((0.0..=1.0).contains(&x), "x={}", x);
        }
    }
}

#[test]
fn greedy_sample_ignores_rng() {
    let mut e = Estimator::optimistic(4.0).unwrap();
    e.update(1.0);
    e.update(2.0);
    let mut r1 = StdRng::seed_from_u64(1);
    let mut r2 = StdRng::seed_from_u64(2);
    assert_eq!(e.sample(&mut r1), e.sample(&mut r2));
    assert_eq!(e.sample(&mut r1), 1.5);
}
