//! Display implementations for domain models.
//!
//! Everything renders as markdown. Timeline markers are `✓` for phases that
//! have ended, `➤` for the active phase and `○` for phases still ahead.

use std::fmt;

use crate::{
    models::{
        AccountStatus, Crop, HistoryEntry, HistoryStatus, Phase, PostHarvest, Task, UserAccount,
        UserProfile, UserRole,
    },
    progress::ActivePhase,
    recommend::Guidance,
    tracker::{JourneyView, StartOutcome},
};

const BAR_WIDTH: usize = 20;

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signed in as **{}** ({})", self.name, self.role)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** (#{}): {}, {}",
            self.name, self.id, self.role, self.status
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.period_label())?;
        writeln!(f)?;

        if !self.desc.is_empty() {
            writeln!(f, "{}", self.desc)?;
            writeln!(f)?;
        }

        if let Some(protocol) = &self.protocol {
            writeln!(f, "#### Protocol")?;
            writeln!(f)?;
            for line in protocol.lines() {
                writeln!(f, "- {line}")?;
            }
            writeln!(f)?;
        }

        if !self.daily_routine.is_empty() {
            writeln!(f, "#### Daily routine")?;
            writeln!(f)?;
            for item in &self.daily_routine {
                writeln!(f, "- {item}")?;
            }
            writeln!(f)?;
        }

        if let Some(risk) = &self.risk {
            writeln!(f, "> **Risk**: {risk}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        let metadata = [
            ("Category", &self.category),
            ("Season", &self.growing_season),
            ("Duration", &self.avg_duration),
            ("Soil", &self.soil_preference),
            ("Water", &self.water_requirement),
        ];
        let mut any = false;
        for (label, value) in metadata {
            if let Some(value) = value {
                writeln!(f, "- **{label}**: {value}")?;
                any = true;
            }
        }
        if any {
            writeln!(f)?;
        }

        if !self.alerts.is_empty() {
            writeln!(f, "## Alerts")?;
            writeln!(f)?;
            for alert in &self.alerts {
                writeln!(f, "- {alert}")?;
            }
            writeln!(f)?;
        }

        if self.routine.is_empty() {
            writeln!(f, "No routine defined for this crop.")?;
        } else {
            writeln!(f, "## Routine")?;
            writeln!(f)?;
            for phase in &self.routine {
                write!(f, "{phase}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.crop_name, self.status)?;
        writeln!(f)?;
        writeln!(f, "- **Sown**: {}", self.start_date)?;
        writeln!(f, "- **Completed**: {}", self.completion_date)?;
        writeln!(f, "- **Duration**: {} days", self.duration)?;
        writeln!(f)
    }
}

impl fmt::Display for PostHarvest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Storage**: {}", self.storage)?;
        writeln!(f, "- **Cleaning**: {}", self.cleaning)?;
        writeln!(f, "- **Soil preparation**: {}", self.soil_prep)
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **Irrigation**: {}", self.irrigation)?;
        writeln!(f, "- **Fertilizer**: {}", self.fertilizer)?;
        writeln!(f, "- **Pests**: {}", self.pests)?;
        writeln!(f, "- **Harvest**: {}", self.harvest)
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("`{}{}`", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn write_task(f: &mut fmt::Formatter<'_>, heading: &str, task: &Task) -> fmt::Result {
    writeln!(
        f,
        "## {heading}: {} (day {}-{})",
        task.title, task.start_day, task.end_day
    )?;
    writeln!(f)?;
    if !task.desc.is_empty() {
        writeln!(f, "{}", task.desc)?;
        writeln!(f)?;
    }
    Ok(())
}

impl JourneyView {
    fn marker(&self, index: usize) -> &'static str {
        match self.active_phase {
            ActivePhase::HarvestComplete => "✓",
            ActivePhase::Phase(active) if index < active => "✓",
            ActivePhase::Phase(active) if index == active => "➤",
            ActivePhase::Phase(_) => "○",
        }
    }

    fn fmt_timeline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Timeline")?;
        writeln!(f)?;
        for (index, phase) in self.journey.schedule.iter().enumerate() {
            let done = if self.journey.is_task_completed(&phase.title) {
                " *(marked done)*"
            } else {
                ""
            };
            writeln!(
                f,
                "- {} **{}** ({}){done}",
                self.marker(index),
                phase.title,
                phase.period_label()
            )?;
        }
        writeln!(f)
    }

    fn fmt_checklist(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subtasks = self.daily_subtasks();
        if subtasks.is_empty() {
            return Ok(());
        }

        let done = subtasks
            .iter()
            .filter(|s| self.daily_checklist.is_done(s))
            .count();
        writeln!(f, "## Today's routine ({done}/{})", subtasks.len())?;
        writeln!(f)?;
        for subtask in subtasks {
            let mark = if self.daily_checklist.is_done(subtask) {
                "x"
            } else {
                " "
            };
            writeln!(f, "- [{mark}] {subtask}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for JourneyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} journey", self.journey.crop_name)?;
        writeln!(f)?;
        writeln!(
            f,
            "Sown on {}, day **{}** as of {}",
            self.journey.sowing_date, self.days_since_sowing, self.today
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{} {:.0}%",
            progress_bar(self.progress_percent),
            self.progress_percent
        )?;
        writeln!(f)?;

        if self.harvest_complete {
            writeln!(f, "## Harvest complete")?;
            writeln!(f)?;
            writeln!(
                f,
                "All phases have ended. Complete the journey to archive it."
            )?;
            writeln!(f)?;
            writeln!(f, "### Post-harvest guidance")?;
            writeln!(f)?;
            write!(f, "{}", self.journey.post_harvest)?;
            writeln!(f)?;
        } else {
            if let Some(task) = &self.current_task {
                write_task(f, "Current task", task)?;
            }
            match (&self.next_task, self.days_until_next()) {
                (Some(task), Some(days)) => {
                    writeln!(f, "Next: **{}** in {days} day(s)", task.title)?;
                    writeln!(f)?;
                }
                _ => {
                    writeln!(f, "Final stretch: harvest is approaching.")?;
                    writeln!(f)?;
                }
            }
        }

        self.fmt_timeline(f)?;
        self.fmt_checklist(f)
    }
}

impl fmt::Display for StartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartOutcome::Started(view) => {
                writeln!(f, "Started a {} journey.", view.journey.crop_name)?;
                writeln!(f)?;
                write!(f, "{view}")
            }
            StartOutcome::Conflict { existing_crop } => writeln!(
                f,
                "A {existing_crop} journey is already active. Start again with force to replace it."
            ),
        }
    }
}
