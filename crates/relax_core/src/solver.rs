//! Closed-form solutions of the two first-order processes.

use crate::model::RelaxationModel;
use crate::traits::{AnalyticSolution, Scalar};

/// Newton cooling: T(t) = T_a + (T_0 - T_a) * e^(-k t)
pub fn cooling_value<T: Scalar>(initial: T, ambient: T, rate_constant: T, t: T) -> T {
    ambient + (initial - ambient) * (-rate_constant * t).exp()
}

/// Radioactive decay: N(t) = N_0 * e^(-λ t)
pub fn decay_value<T: Scalar>(initial: T, decay_constant: T, t: T) -> T {
    initial * (-decay_constant * t).exp()
}

/// Decay constant λ = ln(2) / half-life.
pub fn decay_constant<T: Scalar>(half_life: T) -> T {
    T::from_f64(std::f64::consts::LN_2).unwrap_or_else(T::nan) / half_life
}

impl AnalyticSolution<f64> for RelaxationModel {
    fn value_at(&self, t: f64) -> f64 {
        match *self {
            RelaxationModel::Cooling {
                initial,
                ambient,
                rate_constant,
            } => cooling_value(initial, ambient, rate_constant, t),
            RelaxationModel::Decay { initial, half_life } => {
                decay_value(initial, decay_constant(half_life), t)
            }
        }
    }

    fn horizon(&self) -> f64 {
        self.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn cooling_scenario_matches_hand_values() {
        let model = RelaxationModel::cooling(100.0, 25.0, 0.15).expect("model");
        assert_eq!(model.value_at(0.0), 100.0);
        let end = model.value_at(model.horizon());
        assert!((end - 25.505).abs() < 1e-3, "end value {end}");
    }

    #[test]
    fn decay_scenario_matches_hand_values() {
        let model = RelaxationModel::decay(100.0, 5730.0).expect("model");
        assert_eq!(model.value_at(0.0), 100.0);
        assert!((model.value_at(5730.0) - 50.0).abs() < 1e-9);
        // Five half-lives leave 2^-5 of the initial quantity.
        assert!((model.value_at(28_650.0) - 3.125).abs() < 1e-9);
    }

    #[test]
    fn degenerate_cooling_is_constant() {
        let model = RelaxationModel::cooling(30.0, 30.0, 0.2).expect("model");
        for t in [0.0, 1.0, 10.0, model.horizon()] {
            assert_eq!(model.value_at(t), 30.0);
        }
    }

    #[test]
    fn solver_is_generic_over_scalar_width() {
        let narrow = cooling_value(100.0_f32, 25.0, 0.15, 10.0);
        let wide = cooling_value(100.0_f64, 25.0, 0.15, 10.0);
        assert!((f64::from(narrow) - wide).abs() < 1e-4);
        assert!((decay_constant(5730.0_f32) - 0.000_120_97).abs() < 1e-7);
    }

    proptest! {
        #[test]
        fn cooling_end_leaves_e_minus_five_of_gap(
            initial in -200.0f64..1000.0,
            ambient in -200.0f64..1000.0,
            k in 1e-3f64..10.0,
        ) {
            let model = RelaxationModel::cooling(initial, ambient, k).unwrap();
            prop_assert!(close(model.value_at(0.0), initial, 1e-12));
            let expected = ambient + (initial - ambient) * (-5.0f64).exp();
            prop_assert!(close(model.value_at(model.horizon()), expected, 1e-9));
        }

        #[test]
        fn cooling_stays_between_initial_and_ambient(
            initial in -200.0f64..1000.0,
            ambient in -200.0f64..1000.0,
            k in 1e-3f64..10.0,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let model = RelaxationModel::cooling(initial, ambient, k).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let v_lo = model.value_at(lo * model.horizon());
            let v_hi = model.value_at(hi * model.horizon());
            let (min, max) = (initial.min(ambient), initial.max(ambient));
            prop_assert!(v_lo >= min - 1e-9 && v_lo <= max + 1e-9);
            // Distance to the asymptote never grows with time.
            prop_assert!((v_hi - ambient).abs() <= (v_lo - ambient).abs() + 1e-9);
        }

        #[test]
        fn decay_halves_every_half_life(
            initial in 1e-3f64..1e6,
            half_life in 1e-3f64..1e10,
        ) {
            let model = RelaxationModel::decay(initial, half_life).unwrap();
            prop_assert!(close(model.value_at(0.0), initial, 1e-12));
            prop_assert!(close(model.value_at(half_life), initial / 2.0, 1e-9));
            prop_assert!(close(model.value_at(5.0 * half_life), initial * (-5.0f64 * std::f64::consts::LN_2).exp(), 1e-9));
        }
    }
}
