//! Plain terminal surface used by the shipped binary

use crate::render::ActivityRow;
use crate::surface::{BannerTone, Control, ControlState, Surface};

/// Renders the dashboard as plain text on stdout
#[derive(Debug, Default)]
pub struct TermSurface;

impl Surface for TermSurface {
    fn show_counters(&self, pending: i64, published: i64, errors: i64) {
        println!(
            "Pending posts: {}   Published today: {}   Errors: {}",
            pending, published, errors
        );
    }

    fn replace_activity(&self, rows: Vec<ActivityRow>) {
        if rows.is_empty() {
            println!("No recent activity.");
            return;
        }

        println!(
            "{:<20} {:<28} {:<18} Details",
            "Time", "Action", "Status"
        );
        for row in rows {
            // The badge carries the three-way classification; the raw
            // status text stays visible next to it.
            let status = format!("{} [{}]", row.status, row.badge);
            println!(
                "{:<20} {:<28} {:<18} {}",
                row.time, row.action, status, row.details
            );
        }
    }

    fn show_banner(&self, tone: BannerTone, text: &str) {
        let tag = match tone {
            BannerTone::Info => "INFO",
            BannerTone::Success => "OK",
            BannerTone::Danger => "ERROR",
        };
        println!("[{}] {}", tag, text);
    }

    fn set_control(&self, control: Control, state: ControlState) {
        // A terminal has no buttons to disable; the state change is
        // still worth tracing.
        tracing::debug!("Control {:?} -> {:?}", control, state);
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
