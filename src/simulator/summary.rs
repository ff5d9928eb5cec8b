//! Per-run aggregate statistics.

use super::round::{RoundOutcome, TargetStep};
use serde::{Deserialize, Serialize};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every requested round was played.
    Completed,
    /// Balance fell below the bet.
    InsufficientFunds,
    /// The cancel token fired between rounds.
    Cancelled,
}

/// Aggregate over the rounds of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub start_balance: f64,
    pub end_balance: f64,
    pub total_wagered: f64,
    pub total_returned: f64,
    /// total_returned / total_wagered, 0 when nothing was wagered.
    pub rtp: f64,
    pub win_rate: f64,
    pub wins: u64,
    pub losses: u64,
    pub peak_balance: f64,
    /// Largest relative peak-to-trough decline, in [0, 1].
    pub max_drawdown: f64,
    pub longest_losing_streak: u64,
    pub largest_payout: f64,
    pub rounds_requested: u64,
    pub rounds_completed: u64,
    pub target: TargetStep,
    pub stop_reason: StopReason,
}

impl SimulationSummary {
    pub fn net_result(&self) -> f64 {
        self.total_returned - self.total_wagered
    }

    /// Combine shard summaries that each started from `start_balance`.
    ///
    /// Counters are summed. Drawdown, streak and largest payout are the max
    /// over shards since each shard walked its own balance. The merged end
    /// balance is `start_balance` plus the summed net result, and the peak
    /// is the highest of every shard peak and that end balance, so
    /// `end_balance <= peak_balance` holds as it does for a single run.
    pub fn merge_shards(
        start_balance: f64,
        rounds_requested: u64,
        target: TargetStep,
        shards: &[SimulationSummary],
    ) -> Self {
        let mut merged = SummaryAccumulator::new(start_balance, rounds_requested, target);
        let mut stop_reason = StopReason::Completed;

        for shard in shards {
            merged.total_wagered += shard.total_wagered;
            merged.total_returned += shard.total_returned;
            merged.wins += shard.wins;
            merged.losses += shard.losses;
            merged.rounds_completed += shard.rounds_completed;
            merged.peak_balance = merged.peak_balance.max(shard.peak_balance);
            merged.max_drawdown = merged.max_drawdown.max(shard.max_drawdown);
            merged.longest_losing_streak =
                merged.longest_losing_streak.max(shard.longest_losing_streak);
            merged.largest_payout = merged.largest_payout.max(shard.largest_payout);

            stop_reason = match (stop_reason, shard.stop_reason) {
                (StopReason::Cancelled, _) | (_, StopReason::Cancelled) => StopReason::Cancelled,
                (StopReason::InsufficientFunds, _) | (_, StopReason::InsufficientFunds) => {
                    StopReason::InsufficientFunds
                }
                _ => StopReason::Completed,
            };
        }

        merged.balance = start_balance + merged.total_returned - merged.total_wagered;
        merged.peak_balance = merged.peak_balance.max(merged.balance);
        merged.finish(stop_reason)
    }
}

/// Running totals while a run is in progress.
#[derive(Debug, Clone)]
pub(crate) struct SummaryAccumulator {
    start_balance: f64,
    pub(crate) balance: f64,
    total_wagered: f64,
    total_returned: f64,
    wins: u64,
    losses: u64,
    current_losing_streak: u64,
    longest_losing_streak: u64,
    peak_balance: f64,
    max_drawdown: f64,
    largest_payout: f64,
    rounds_requested: u64,
    rounds_completed: u64,
    target: TargetStep,
}

impl SummaryAccumulator {
    pub(crate) fn new(start_balance: f64, rounds_requested: u64, target: TargetStep) -> Self {
        Self {
            start_balance,
            balance: start_balance,
            total_wagered: 0.0,
            total_returned: 0.0,
            wins: 0,
            losses: 0,
            current_losing_streak: 0,
            longest_losing_streak: 0,
            peak_balance: start_balance,
            max_drawdown: 0.0,
            largest_payout: 0.0,
            rounds_requested,
            rounds_completed: 0,
            target,
        }
    }

    /// Take the stake out of the balance before the round is played.
    pub(crate) fn place_bet(&mut self, bet: f64) {
        self.balance -= bet;
        self.total_wagered += bet;
    }

    /// Credit the round's payout and update every running aggregate.
    pub(crate) fn settle(&mut self, outcome: &RoundOutcome) {
        self.rounds_completed += 1;
        self.balance += outcome.payout;
        self.total_returned += outcome.payout;
        self.largest_payout = self.largest_payout.max(outcome.payout);

        if outcome.won {
            self.wins += 1;
            self.current_losing_streak = 0;
        } else {
            self.losses += 1;
            self.current_losing_streak += 1;
            self.longest_losing_streak = self.longest_losing_streak.max(self.current_losing_streak);
        }

        self.peak_balance = self.peak_balance.max(self.balance);
        if self.peak_balance > 0.0 {
            let drawdown = (self.peak_balance - self.balance) / self.peak_balance;
            self.max_drawdown = self.max_drawdown.max(drawdown);
        }
    }

    pub(crate) fn finish(self, stop_reason: StopReason) -> SimulationSummary {
        let rtp = if self.total_wagered > 0.0 {
            self.total_returned / self.total_wagered
        } else {
            0.0
        };
        let win_rate = if self.rounds_completed > 0 {
            self.wins as f64 / self.rounds_completed as f64
        } else {
            0.0
        };

        SimulationSummary {
            start_balance: self.start_balance,
            end_balance: self.balance,
            total_wagered: self.total_wagered,
            total_returned: self.total_returned,
            rtp,
            win_rate,
            wins: self.wins,
            losses: self.losses,
            peak_balance: self.peak_balance,
            max_drawdown: self.max_drawdown,
            longest_losing_streak: self.longest_losing_streak,
            largest_payout: self.largest_payout,
            rounds_requested: self.rounds_requested,
            rounds_completed: self.rounds_completed,
            target: self.target,
            stop_reason,
        }
    }
}
