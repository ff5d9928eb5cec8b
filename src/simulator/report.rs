//! Simulation report generation.

use super::config::SimConfig;
use super::summary::{SimulationSummary, StopReason};
use crate::grid::{GridConfiguration, HouseEdge};
use crate::odds::{multiplier_for_step, survival_probability};
use serde::Serialize;
use std::time::Duration;

/// A run summary alongside the figures it should converge to.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub grid: String,
    pub rows: u32,
    pub cols: u32,
    pub stop_points: u32,
    pub house_edge: f64,
    pub target_multiplier: f64,
    /// Chance a single round reaches the effective target.
    pub theoretical_win_rate: f64,
    /// Standard error of realized RTP over the completed rounds.
    pub rtp_std_error: f64,
    pub seed: Option<u64>,
    pub shards: usize,
    pub elapsed_secs: f64,
    pub summary: SimulationSummary,
}

impl SimReport {
    pub fn new(
        grid: &str,
        cfg: &GridConfiguration,
        edge: HouseEdge,
        config: &SimConfig,
        summary: SimulationSummary,
        elapsed: Duration,
    ) -> Self {
        let step = summary.target.effective;
        let win_rate = survival_probability(step, cfg);
        let multiplier = multiplier_for_step(step, cfg, edge);

        // per-round return is `multiplier` with chance `win_rate`, else 0
        let rtp_std_error = if summary.rounds_completed > 0 {
            multiplier * (win_rate * (1.0 - win_rate) / summary.rounds_completed as f64).sqrt()
        } else {
            0.0
        };

        Self {
            grid: grid.to_string(),
            rows: cfg.rows(),
            cols: cfg.cols(),
            stop_points: cfg.stop_point_count(),
            house_edge: edge.value(),
            target_multiplier: multiplier,
            theoretical_win_rate: win_rate,
            rtp_std_error,
            seed: config.seed,
            shards: config.shards,
            elapsed_secs: elapsed.as_secs_f64(),
            summary,
        }
    }

    /// Distance of realized RTP from the house edge, in standard errors.
    pub fn rtp_deviation_sigmas(&self) -> f64 {
        if self.rtp_std_error > 0.0 {
            (self.summary.rtp - self.house_edge) / self.rtp_std_error
        } else {
            0.0
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Grid {} ({}x{}, {} stop points), house edge {:.2}\n",
            self.grid, self.rows, self.cols, self.stop_points, self.house_edge
        ));
        report.push_str(&format!(
            "Rounds: {} requested, {} completed ({})\n",
            s.rounds_requested,
            s.rounds_completed,
            stop_reason_text(s.stop_reason)
        ));
        if s.target.was_clamped() {
            report.push_str(&format!(
                "Target step {} clamped to {}\n",
                s.target.requested, s.target.effective
            ));
        }
        if self.shards > 1 {
            report.push_str(&format!(
                "Shards: {} (each from the starting balance)\n",
                self.shards
            ));
        }
        report.push_str(&format!("Elapsed: {:.2}s\n\n", self.elapsed_secs));

        report.push_str("── RETURN ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Target Step:         {}\n", s.target.effective));
        report.push_str(&format!(
            "  Target Multiplier:   {:.4}x\n",
            self.target_multiplier
        ));
        report.push_str(&format!("  Total Wagered:       {:.2}\n", s.total_wagered));
        report.push_str(&format!("  Total Returned:      {:.2}\n", s.total_returned));
        report.push_str(&format!(
            "  Realized RTP:        {:.4}% (expected {:.2}%)\n",
            s.rtp * 100.0,
            self.house_edge * 100.0
        ));
        report.push_str(&format!(
            "  Win Rate:            {:.4}% (expected {:.4}%)\n\n",
            s.win_rate * 100.0,
            self.theoretical_win_rate * 100.0
        ));

        report.push_str("── BANKROLL ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Start Balance:       {:.2}\n", s.start_balance));
        report.push_str(&format!("  End Balance:         {:.2}\n", s.end_balance));
        report.push_str(&format!("  Peak Balance:        {:.2}\n", s.peak_balance));
        report.push_str(&format!(
            "  Max Drawdown:        {:.2}%\n",
            s.max_drawdown * 100.0
        ));
        report.push_str(&format!("  Largest Payout:      {:.2}\n", s.largest_payout));
        report.push_str(&format!(
            "  Longest Loss Streak: {}\n\n",
            s.longest_losing_streak
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if s.rounds_completed == 0 {
            report.push_str("  ⚠️  No rounds played - balance below bet?\n");
        } else {
            let sigmas = self.rtp_deviation_sigmas();
            let verdict = if sigmas.abs() <= 3.0 {
                "CONSISTENT - RTP within sampling error of the house edge"
            } else {
                "SUSPECT - RTP outside 3 standard errors of the house edge"
            };
            report.push_str(&format!("  RTP Std Error:   {:.4}%\n", self.rtp_std_error * 100.0));
            report.push_str(&format!("  Deviation:       {:+.2} sigma\n", sigmas));
            report.push_str(&format!("  Verdict:         {}\n", verdict));
            if s.rounds_completed < 10_000 {
                report.push_str("  ⚠️  Small sample - run more rounds for a firm verdict\n");
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn stop_reason_text(reason: StopReason) -> &'static str {
    match reason {
        StopReason::Completed => "completed",
        StopReason::InsufficientFunds => "stopped: balance below bet",
        StopReason::Cancelled => "stopped: cancelled",
    }
}
