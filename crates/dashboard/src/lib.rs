use std::sync::Arc;

use dataset::Dataset;
use shared::{
    domain::{ControlId, ControlSpec, ViewId},
    protocol::{Chart, ControlOverrides},
};
use tracing::debug;

pub mod binding;
pub mod controls;
pub mod error;
pub mod views;

pub use binding::{Rendered, Session};
pub use controls::ControlState;
pub use error::{ControlError, ViewError};
pub use views::View;

/// The loaded table plus every view and the controls they declare.
/// Shared read-only by all sessions.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    controls: Vec<ControlSpec>,
    views: Vec<Box<dyn View>>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let views = views::registry();
        let controls = views
            .iter()
            .flat_map(|view| view.controls(&dataset))
            .collect();
        Self {
            dataset,
            controls,
            views,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    pub fn control(&self, id: ControlId) -> Option<&ControlSpec> {
        self.controls.iter().find(|spec| spec.id == id)
    }

    pub fn views(&self) -> impl Iterator<Item = &(dyn View + 'static)> {
        self.views.iter().map(|view| view.as_ref())
    }

    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.views().find(|view| view.id() == id)
    }

    pub fn default_state(&self) -> ControlState {
        ControlState::from_defaults(&self.controls)
    }

    pub fn state_with(&self, overrides: &ControlOverrides) -> Result<ControlState, ControlError> {
        ControlState::with_overrides(&self.controls, overrides)
    }

    pub fn render(&self, id: ViewId, state: &ControlState) -> Result<Chart, ViewError> {
        let view = self.view(id).ok_or(ViewError::UnknownView(id))?;
        debug!(view = %id, "rendering view");
        view.render(&self.dataset, state)
    }
}
