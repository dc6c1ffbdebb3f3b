//! Case records moving through the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Newly created, not yet picked up.
    Open,
    /// Being worked on.
    InProgress,
    /// Closed out.
    Resolved,
}

/// Priority of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePriority {
    /// Routine work.
    Low,
    /// Should be handled soon.
    Medium,
    /// Handle before medium/low work.
    High,
    /// Drop everything.
    Urgent,
}

/// A single case record in the pipeline.
///
/// Cases are created by stream-producing nodes (see `caseflow-sim`), carried
/// through stages by the surrounding workflow, and eventually parked in an
/// [`Outbox`](crate::Outbox) until their retention window lapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Stable internal identity.
    pub id: Uuid,
    /// Human-readable title.
    pub label: String,
    /// Display case number, e.g. `#AC7829`.
    pub case_number: String,
    /// Workflow status.
    pub status: CaseStatus,
    /// Priority.
    pub priority: CasePriority,
    /// Assignee display name, if assigned.
    pub assignee: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Names of attached files.
    pub attached_files: Vec<String>,
    /// Free-form operator notes.
    pub notepad: String,
    /// Identifier of the stage currently holding the case.
    pub current_stage: String,
    /// When the case entered its current stage.
    pub stage_entered_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Create a new open, unassigned case in the `inbox` stage.
    pub fn new(label: impl Into<String>, case_number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            case_number: case_number.into(),
            status: CaseStatus::Open,
            priority: CasePriority::Medium,
            assignee: None,
            created_at: now,
            due_date: None,
            tags: Vec::new(),
            attached_files: Vec::new(),
            notepad: String::new(),
            current_stage: "inbox".to_string(),
            stage_entered_at: now,
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: CasePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the due date.
    #[must_use]
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Add tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add attached file names.
    #[must_use]
    pub fn with_attachments<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attached_files
            .extend(files.into_iter().map(Into::into));
        self
    }

    /// Set the notepad text.
    #[must_use]
    pub fn with_notepad(mut self, notes: impl Into<String>) -> Self {
        self.notepad = notes.into();
        self
    }

    /// Move the case to a new stage, stamping the transition time.
    pub fn advance_stage(&mut self, stage: impl Into<String>) {
        self.current_stage = stage.into();
        self.stage_entered_at = Utc::now();
    }

    /// Whether the case is unassigned.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assignee.is_none()
    }
}

/// A small representative set of cases spread across pipeline stages.
///
/// Useful for demos and for seeding tests that need realistic records.
#[must_use]
pub fn seed_cases() -> Vec<CaseRecord> {
    vec![
        CaseRecord::new("Broken AC Unit in Building A", "#AC7829")
            .with_priority(CasePriority::Urgent)
            .with_tags(["HVAC", "Emergency"])
            .with_attachments(["ac_unit_photo.jpg", "floor_plan.pdf"])
            .with_notepad(
                "Tenant reports AC unit making loud grinding noise. Temperature \
                 reading shows 28\u{b0}C in office space. Needs immediate attention.",
            ),
        CaseRecord::new("Water Leak in Parking Garage", "#WL4532")
            .with_priority(CasePriority::High)
            .with_tags(["Plumbing", "Parking"])
            .with_attachments(["leak_video.mp4"])
            .with_notepad(
                "Security noticed water pooling in P2 level. Source appears to be \
                 ceiling pipe. Affecting parking spots 45-52.",
            ),
        {
            let mut case = CaseRecord::new("Elevator Maintenance Request", "#EL9201")
                .with_status(CaseStatus::InProgress)
                .with_assignee("Sarah Johnson")
                .with_tags(["Elevator", "Maintenance"])
                .with_attachments(["maintenance_schedule.pdf", "inspection_report.pdf"])
                .with_notepad(
                    "Annual elevator inspection scheduled. Need to coordinate with \
                     building tenants for downtime. Sarah is reviewing contractor quotes.",
                );
            case.advance_stage("procedure-1:2");
            case
        },
        {
            let mut case = CaseRecord::new("Replace Broken Window - Suite 405", "#WN3387")
                .with_status(CaseStatus::InProgress)
                .with_tags(["Glazing", "Tenant"])
                .with_notepad("Waiting on replacement pane delivery; tenant notified.");
            case.advance_stage("procedure-1:1");
            case
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_case_starts_open_in_inbox() {
        let case = CaseRecord::new("Test", "#T0001");
        assert_eq!(case.status, CaseStatus::Open);
        assert_eq!(case.current_stage, "inbox");
        assert!(case.is_unassigned());
    }

    #[test]
    fn advance_stage_stamps_transition_time() {
        let mut case = CaseRecord::new("Test", "#T0002");
        let before = case.stage_entered_at;
        case.advance_stage("outbox");
        assert_eq!(case.current_stage, "outbox");
        assert!(case.stage_entered_at >= before);
    }

    #[test]
    fn builder_accumulates_tags_and_attachments() {
        let case = CaseRecord::new("Test", "#T0003")
            .with_tags(["a"])
            .with_tags(["b"])
            .with_attachments(["f.pdf"]);
        assert_eq!(case.tags, vec!["a", "b"]);
        assert_eq!(case.attached_files, vec!["f.pdf"]);
    }

    #[test]
    fn priority_orders_urgent_highest() {
        assert!(CasePriority::Urgent > CasePriority::High);
        assert!(CasePriority::High > CasePriority::Medium);
        assert!(CasePriority::Medium > CasePriority::Low);
    }

    #[test]
    fn seed_cases_cover_multiple_stages() {
        let cases = seed_cases();
        assert_eq!(cases.len(), 4);
        assert!(cases.iter().any(|c| c.current_stage == "inbox"));
        assert!(cases.iter().any(|c| c.current_stage.starts_with("procedure")));
    }

    #[test]
    fn case_round_trips_through_json() {
        let case = CaseRecord::new("Test", "#T0004").with_priority(CasePriority::Low);
        let json = serde_json::to_string(&case).unwrap();
        let back: CaseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.case_number, "#T0004");
        assert_eq!(back.priority, CasePriority::Low);
    }
}
