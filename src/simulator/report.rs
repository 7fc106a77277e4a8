//! Simulation summary and text report.

use serde::{Deserialize, Serialize};

/// Aggregate counters for one offline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub combats_won: u32,
    pub combats_lost: u32,
    pub total_xp_gained: u64,
    pub total_gold_gained: u64,
    pub gold_lost: u64,
    pub levels_gained: u32,
    pub deaths: u32,
    pub locations_discovered: Vec<String>,
    pub items_found: Vec<String>,
    pub major_events: Vec<String>,
    pub game_minutes_elapsed: u64,
    pub activities_recorded: usize,
    /// Set when the run stopped on the activity cap instead of the time budget
    pub activity_cap_reached: bool,
}

impl SimulationSummary {
    pub fn combats_fought(&self) -> u32 {
        self.combats_won + self.combats_lost
    }

    pub fn win_rate(&self) -> f64 {
        if self.combats_fought() == 0 {
            return 0.0;
        }
        self.combats_won as f64 / self.combats_fought() as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                   WHILE YOU WERE AWAY\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Game time: {}h {:02}m across {} activities\n",
            self.game_minutes_elapsed / 60,
            self.game_minutes_elapsed % 60,
            self.activities_recorded
        ));
        if self.activity_cap_reached {
            report.push_str("  ⚠️  Stopped early: activity cap reached\n");
        }
        report.push('\n');

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Won:       {}\n", self.combats_won));
        report.push_str(&format!("  Lost:      {}\n", self.combats_lost));
        report.push_str(&format!(
            "  Win Rate:  {:.1}%\n",
            self.win_rate() * 100.0
        ));
        report.push_str(&format!("  Deaths:    {}\n\n", self.deaths));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  XP Gained:     {}\n", self.total_xp_gained));
        report.push_str(&format!("  Levels Gained: {}\n", self.levels_gained));
        report.push_str(&format!("  Gold Gained:   {}\n", self.total_gold_gained));
        report.push_str(&format!("  Gold Lost:     {}\n\n", self.gold_lost));

        if !self.locations_discovered.is_empty() || !self.items_found.is_empty() {
            report.push_str("── DISCOVERIES ──────────────────────────────────────────────────\n");
            for location in &self.locations_discovered {
                report.push_str(&format!("  📍 {}\n", location));
            }
            for item in &self.items_found {
                report.push_str(&format!("  🎁 {}\n", item));
            }
            report.push('\n');
        }

        if !self.major_events.is_empty() {
            report.push_str("── MAJOR EVENTS ─────────────────────────────────────────────────\n");
            for event in &self.major_events {
                report.push_str(&format!("  • {}\n", event));
            }
            report.push('\n');
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }
}
