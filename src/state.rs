//! Session state for the product-input and canvas views.
//!
//! All UI state lives in one container transitioned by discrete events,
//! instead of scattered mutable globals: the package list, the last
//! placement result and the canvas selection. The API holds exactly one
//! `SessionState` behind an async mutex and applies one event at a time.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{PackageDescriptor, PackageDraft, PlacementResult};
use crate::placement::plan_placement;

/// Discrete events that transition the session state.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Add a package from raw form input.
    AddPackage { draft: PackageDraft },
    /// Remove a package; invalidates any placement result.
    RemovePackage { id: String },
    /// Drop all packages and the placement result.
    ClearAll,
    /// Toggle-select a showcase box on the canvas.
    SelectBox { id: u32 },
    /// Set or clear the hovered showcase box.
    HoverBox { id: Option<u32> },
    /// Run the placement planner over the current package list.
    ComputePlacement,
}

/// Serializable view of the session after an event was applied.
///
/// `notice` carries the user-facing message for rejected events (missing
/// form fields, empty package list); the state itself is unchanged in
/// those cases.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub packages: Vec<PackageDescriptor>,
    pub selected_box: Option<u32>,
    pub hovered_box: Option<u32>,
    pub placement: Option<PlacementResult>,
    pub notice: Option<String>,
}

/// In-memory state of one visualizer session.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    packages: Vec<PackageDescriptor>,
    next_id: u64,
    selected_box: Option<u32>,
    hovered_box: Option<u32>,
    placement: Option<PlacementResult>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages in insertion order.
    pub fn packages(&self) -> &[PackageDescriptor] {
        &self.packages
    }

    /// Last placement result, if one was computed and is still valid.
    pub fn placement(&self) -> Option<&PlacementResult> {
        self.placement.as_ref()
    }

    /// Applies one event and returns the resulting view.
    pub fn apply(&mut self, event: SessionEvent) -> SessionView {
        let notice = match event {
            SessionEvent::AddPackage { draft } => self.add_package(draft),
            SessionEvent::RemovePackage { id } => {
                self.packages.retain(|p| p.id != id);
                self.placement = None;
                None
            }
            SessionEvent::ClearAll => {
                self.packages.clear();
                self.placement = None;
                None
            }
            SessionEvent::SelectBox { id } => {
                // Clicking the selected box again deselects it.
                self.selected_box = if self.selected_box == Some(id) {
                    None
                } else {
                    Some(id)
                };
                None
            }
            SessionEvent::HoverBox { id } => {
                self.hovered_box = id;
                None
            }
            SessionEvent::ComputePlacement => self.compute_placement(),
        };
        self.view(notice)
    }

    /// Current view without applying an event.
    pub fn current_view(&self) -> SessionView {
        self.view(None)
    }

    fn add_package(&mut self, draft: PackageDraft) -> Option<String> {
        if !draft.is_complete() {
            return Some("Please fill in name and contents".to_string());
        }
        self.next_id += 1;
        self.packages
            .push(draft.into_descriptor(self.next_id.to_string()));
        None
    }

    fn compute_placement(&mut self) -> Option<String> {
        if self.packages.is_empty() {
            return Some("Please add at least one package".to_string());
        }
        self.placement = Some(plan_placement(self.packages.clone()));
        None
    }

    fn view(&self, notice: Option<String>) -> SessionView {
        SessionView {
            packages: self.packages.clone(),
            selected_box: self.selected_box,
            hovered_box: self.hovered_box,
            placement: self.placement.clone(),
            notice,
        }
    }
}
