use serde::{Deserialize, Serialize};

/// Flat annual per-technician rate.
pub const ATERA_ANNUAL_RATE_PER_TECHNICIAN: f64 = 1_500.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub atera_cost: f64,
    pub provider_cost: f64,
    pub savings: f64,
}

/// Maps `[technicians, endpoints, price per endpoint per month]` to annual costs.
///
/// Missing or non-finite inputs count as zero. No rounding happens here;
/// rounding is a display concern.
#[must_use]
pub fn compute(values: &[f64]) -> CalculationResult {
    let technicians = input_at(values, 0);
    let endpoints = input_at(values, 1);
    let price_per_endpoint = input_at(values, 2);

    let atera_cost = technicians * ATERA_ANNUAL_RATE_PER_TECHNICIAN;
    let provider_cost = endpoints * price_per_endpoint * MONTHS_PER_YEAR;
    let savings = (provider_cost - atera_cost).max(0.0);

    CalculationResult {
        atera_cost,
        provider_cost,
        savings,
    }
}

fn input_at(values: &[f64], index: usize) -> f64 {
    values
        .get(index)
        .copied()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
