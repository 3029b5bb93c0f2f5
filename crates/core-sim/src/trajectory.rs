use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    config::SimulationConfig, cycle, error::Result, platform::Platform, round_to,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRow {
    pub month: u32,
    pub capital: f64,
    pub profit: f64,
    pub balances: BTreeMap<Platform, f64>,
    pub return_rate_pct: f64,
    pub accumulated_return_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryOutcome {
    pub rows: Vec<SimulationRow>,
    /// First month whose redistribution was skipped because the running
    /// total had fallen to zero or below.
    pub degenerate_from: Option<u32>,
    /// Month that produced a non-finite figure. Rows stop before it.
    pub halted_at: Option<u32>,
}

pub fn simulate(config: &SimulationConfig) -> Result<Vec<SimulationRow>> {
    simulate_detailed(config).map(|outcome| outcome.rows)
}

pub fn simulate_detailed(config: &SimulationConfig) -> Result<TrajectoryOutcome> {
    config.validate()?;

    let mut rows = Vec::with_capacity(config.months as usize + 1);
    rows.push(SimulationRow {
        month: 0,
        capital: config.initial_capital,
        profit: 0.0,
        balances: config.platform_capital.clone(),
        return_rate_pct: 0.0,
        accumulated_return_pct: 0.0,
    });

    let mut balances = config.platform_capital.clone();
    let mut current_capital = config.initial_capital;
    let mut previous_capital = config.initial_capital;
    let mut degenerate_from = None;
    let mut halted_at = None;

    for month in 1..=config.months {
        let monthly_profit: f64 = balances
            .iter()
            .filter_map(|(&platform, &capital)| {
                config.platforms.get(platform).map(|spec| {
                    cycle::monthly_return(
                        spec,
                        capital,
                        config.spread_pct,
                        config.cycles_per_month_base,
                    )
                    .monthly_profit
                })
            })
            .sum();

        let monthly_return_rate = if current_capital > 0.0 {
            monthly_profit / current_capital
        } else {
            0.0
        };

        let reinvested_profit = monthly_profit * config.reinvestment_rate_pct / 100.0;
        let new_total_capital = previous_capital + reinvested_profit;

        let mut next_balances = balances.clone();
        if previous_capital > 0.0 {
            for balance in next_balances.values_mut() {
                *balance += reinvested_profit * (*balance / previous_capital);
            }
        } else if degenerate_from.is_none() {
            degenerate_from = Some(month);
        }

        let accumulated_return = new_total_capital / config.initial_capital - 1.0;
        let finite = monthly_profit.is_finite()
            && monthly_return_rate.is_finite()
            && new_total_capital.is_finite()
            && accumulated_return.is_finite()
            && next_balances.values().all(|balance| balance.is_finite());
        if !finite {
            halted_at = Some(month);
            break;
        }

        balances = next_balances;
        current_capital = new_total_capital;

        rows.push(SimulationRow {
            month,
            capital: round_to(new_total_capital, 2),
            profit: round_to(monthly_profit, 2),
            balances: balances
                .iter()
                .map(|(&platform, &balance)| (platform, round_to(balance, 2)))
                .collect(),
            return_rate_pct: round_to(monthly_return_rate * 100.0, 2),
            accumulated_return_pct: round_to(accumulated_return * 100.0, 2),
        });

        previous_capital = new_total_capital;
    }

    Ok(TrajectoryOutcome {
        rows,
        degenerate_from,
        halted_at,
    })
}
