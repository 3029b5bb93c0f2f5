use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleBlock {
    pub heading: &'static str,
    pub steps: &'static [&'static str],
}

const WEEKDAYS: ScheduleBlock = ScheduleBlock {
    heading: "Monday-Friday",
    steps: &[
        "Deploy Robinhood capital ($1,000/day)",
        "Deploy Kraken capital (up to $5,000/day)",
        "Monitor Coinbase capital releases (after 6-day hold)",
    ],
};

const TIMING: ScheduleBlock = ScheduleBlock {
    heading: "Timing Strategy",
    steps: &[
        "Morning: Initiate transfers from purchasing platforms",
        "Afternoon: Execute P2P trades on Binance",
        "Evening: Prepare next day's transactions",
    ],
};

/// Fixed daily operating plan shown next to the simulation results.
pub fn operating_schedule() -> [ScheduleBlock; 2] {
    [WEEKDAYS, TIMING]
}
