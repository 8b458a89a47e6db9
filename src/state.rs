use std::path::Path;

use crate::workflow::{report, report_error, Notice, Workflow, WorkflowState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Load / detect controller.
    pub workflow: Workflow,

    /// Notice waiting to be acknowledged (None when no popup is open).
    notice: Option<Notice>,

    /// The notice was raised during the current frame. The key press that
    /// activated a button is still in this frame's input and must not
    /// dismiss the notice it produced.
    raised_this_frame: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Workflow::default())
    }
}

impl AppState {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            notice: None,
            raised_this_frame: false,
        }
    }

    /// Instruction line shown above the buttons.
    pub fn status_text(&self) -> &'static str {
        match self.workflow.state() {
            WorkflowState::Idle => "Upload your medical report for Breast Cancer Detection",
            WorkflowState::Ready { .. } | WorkflowState::Evaluated { .. } => {
                "Report Loaded. Click 'Detect Cancer' to analyze."
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn raise(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.raised_this_frame = true;
    }

    /// Called once at the start of every frame.
    pub fn begin_frame(&mut self) {
        self.raised_this_frame = false;
    }

    pub fn can_detect(&self) -> bool {
        self.workflow.state().is_loaded()
    }

    /// Whether a modal notice currently blocks the main controls.
    pub fn is_blocked(&self) -> bool {
        self.notice.is_some()
    }

    /// The user picked a file in the chooser.
    pub fn load_selected(&mut self, path: &Path) {
        if let Err(e) = self.workflow.load(path) {
            self.raise(report_error(&e));
        }
    }

    pub fn detect(&mut self) {
        let notice = match self.workflow.detect() {
            Ok(accuracy) => report(accuracy),
            Err(e) => report_error(&e),
        };
        self.raise(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Enter / Escape. Ignored for a notice raised in the same frame.
    pub fn dismiss_by_key(&mut self) {
        if !self.raised_this_frame {
            self.dismiss_notice();
        }
    }
}
