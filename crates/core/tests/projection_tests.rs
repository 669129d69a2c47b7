// ═══════════════════════════════════════════════════════════════════
// Projection Engine Tests — scenario compounding, growing contributions,
// rounding, frozen types
// ═══════════════════════════════════════════════════════════════════

use std::collections::BTreeMap;

use networth_tracker_core::models::asset::AssetType;
use networth_tracker_core::models::hypothesis::Hypothesis;
use networth_tracker_core::services::projection_service::ProjectionService;

fn totals(entries: &[(AssetType, f64)]) -> BTreeMap<AssetType, f64> {
    entries.iter().copied().collect()
}

fn hypothesis(
    asset_type: AssetType,
    rates: (f64, f64, f64),
    monthly: (f64, f64),
) -> Hypothesis {
    Hypothesis {
        asset_type,
        pessimistic_rate: rates.0,
        avg_rate: rates.1,
        optimistic_rate: rates.2,
        monthly_contribution_owner1: monthly.0,
        monthly_contribution_owner2: monthly.1,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Shape — year 0, horizon length
// ═══════════════════════════════════════════════════════════════════

mod shape {
    use super::*;

    #[test]
    fn year_zero_is_current_state_exactly() {
        let svc = ProjectionService::new();
        let current = totals(&[
            (AssetType::Stock, 10000.125),
            (AssetType::Crypto, 2999.875),
        ]);
        let hypotheses = Hypothesis::defaults();

        let result = svc.simulate(&current, &hypotheses, 10);

        // Year 0 is unrounded and identical across all three scenarios.
        assert_eq!(result[0].year, 0);
        assert_eq!(result[0].pessimistic, 13000.0);
        assert_eq!(result[0].average, 13000.0);
        assert_eq!(result[0].optimistic, 13000.0);
        assert_eq!(
            result[0].breakdown[&AssetType::Stock].average,
            10000.125
        );
    }

    #[test]
    fn horizon_of_n_years_returns_n_plus_one_entries() {
        let svc = ProjectionService::new();
        let result = svc.simulate(
            &totals(&[(AssetType::Stock, 1000.0)]),
            &Hypothesis::defaults(),
            10,
        );

        assert_eq!(result.len(), 11);
        assert_eq!(result[10].year, 10);
    }

    #[test]
    fn zero_horizon_returns_only_year_zero() {
        let svc = ProjectionService::new();
        let result = svc.simulate(
            &totals(&[(AssetType::Stock, 1000.0)]),
            &Hypothesis::defaults(),
            0,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].year, 0);
    }

    #[test]
    fn empty_portfolio_stays_at_zero() {
        let svc = ProjectionService::new();
        // No holdings at all: nothing to compound, nothing to contribute to.
        let result = svc.simulate(&BTreeMap::new(), &Hypothesis::defaults(), 5);

        assert_eq!(result.len(), 6);
        for year in &result {
            assert_eq!(year.average, 0.0);
            assert!(year.breakdown.is_empty());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Compounding law
// ═══════════════════════════════════════════════════════════════════

mod compounding {
    use super::*;

    #[test]
    fn first_year_applies_rate_then_grown_contribution() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::Stock, 10000.0)]);
        let hypotheses = vec![hypothesis(
            AssetType::Stock,
            (3.0, 7.0, 12.0),
            (500.0, 200.0),
        )];

        let result = svc.simulate(&current, &hypotheses, 1);

        // 10000 * 1.07 + 700 * 12 * 1.01 = 10700 + 8484 = 19184.00
        assert_eq!(result[1].average, 19184.00);
        // 10000 * 1.03 + 8484 = 18784.00
        assert_eq!(result[1].pessimistic, 18784.00);
        // 10000 * 1.12 + 8484 = 19684.00
        assert_eq!(result[1].optimistic, 19684.00);
    }

    #[test]
    fn contribution_grows_one_percent_per_year() {
        let svc = ProjectionService::new();
        // Zero growth rate isolates the contribution stream.
        let current = totals(&[(AssetType::Stock, 0.0)]);
        let hypotheses = vec![hypothesis(AssetType::Stock, (0.0, 0.0, 0.0), (100.0, 0.0))];

        let result = svc.simulate(&current, &hypotheses, 2);

        // Year 1: 100 * 12 * 1.01 = 1212.00
        assert_eq!(result[1].average, 1212.00);
        // Year 2: 1212 + 100 * 12 * 1.01^2 = 1212 + 1224.12 = 2436.12
        assert_eq!(result[2].average, 2436.12);
    }

    #[test]
    fn zero_rate_still_receives_contributions() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::ActiveCash, 5000.0)]);
        let hypotheses = vec![hypothesis(
            AssetType::ActiveCash,
            (0.0, 0.0, 0.0),
            (50.0, 0.0),
        )];

        let result = svc.simulate(&current, &hypotheses, 1);

        // 5000 + 50 * 12 * 1.01 = 5606.00
        assert_eq!(result[1].average, 5606.00);
    }

    #[test]
    fn negative_rates_compound_below_zero() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::Crypto, 100.0)]);
        let hypotheses = vec![hypothesis(
            AssetType::Crypto,
            (-110.0, 10.0, 30.0),
            (0.0, 0.0),
        )];

        let result = svc.simulate(&current, &hypotheses, 2);

        // Year 1: 100 * (1 - 1.10) = -10.00; year 2: -10 * -0.10 = 1.00.
        // No flooring at zero.
        assert_eq!(result[1].pessimistic, -10.00);
        assert_eq!(result[2].pessimistic, 1.00);
    }

    #[test]
    fn scenarios_stay_ordered_with_ordered_rates() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::Stock, 10000.0), (AssetType::Crypto, 3000.0)]);
        let hypotheses = Hypothesis::defaults();

        let result = svc.simulate(&current, &hypotheses, 15);

        for year in &result[1..] {
            assert!(year.pessimistic <= year.average);
            assert!(year.average <= year.optimistic);
        }
    }

    #[test]
    fn values_are_rounded_to_cents_each_year() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::Stock, 1000.0)]);
        let hypotheses = vec![hypothesis(AssetType::Stock, (3.33, 7.77, 12.12), (0.0, 0.0))];

        let result = svc.simulate(&current, &hypotheses, 5);

        for year in &result[1..] {
            for v in [year.pessimistic, year.average, year.optimistic] {
                assert_eq!((v * 100.0).round() / 100.0, v);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Frozen types — totals without a hypothesis
// ═══════════════════════════════════════════════════════════════════

mod frozen_types {
    use super::*;

    #[test]
    fn type_without_hypothesis_carries_forward_unchanged() {
        let svc = ProjectionService::new();
        let current = totals(&[
            (AssetType::Stock, 10000.0),
            (AssetType::StartUp, 25000.0),
        ]);
        // Only Stock is configured; StartUp must neither grow nor vanish.
        let hypotheses = vec![hypothesis(AssetType::Stock, (3.0, 7.0, 12.0), (0.0, 0.0))];

        let result = svc.simulate(&current, &hypotheses, 5);

        for year in &result {
            assert_eq!(year.breakdown[&AssetType::StartUp].average, 25000.0);
        }
        // Totals include the frozen value.
        assert_eq!(result[1].average, 10700.0 + 25000.0);
    }

    #[test]
    fn hypothesis_without_holdings_contributes_nothing() {
        let svc = ProjectionService::new();
        let current = totals(&[(AssetType::Stock, 1000.0)]);
        // Crypto has a contribution configured but no current holdings:
        // no running value exists for it, so nothing accrues.
        let hypotheses = vec![
            hypothesis(AssetType::Stock, (0.0, 0.0, 0.0), (0.0, 0.0)),
            hypothesis(AssetType::Crypto, (0.0, 10.0, 0.0), (1000.0, 0.0)),
        ];

        let result = svc.simulate(&current, &hypotheses, 3);

        assert_eq!(result[3].average, 1000.0);
        assert!(!result[3].breakdown.contains_key(&AssetType::Crypto));
    }
}
