//! Reactive binding between controls and views.
//!
//! A [`Session`] owns the control values of one connected page. Setting a
//! control synchronously re-renders every view subscribed to it, in page
//! order, and hands the fresh outputs back to the caller to display in place
//! of the previous ones. Nothing is cached between renders.

use std::sync::Arc;

use shared::{
    domain::{ControlId, ControlValue, ViewId},
    protocol::{Chart, ServerEvent},
};
use tracing::{debug, warn};

use crate::{
    controls::{validate, ControlState},
    error::{ControlError, ViewError},
    Dashboard,
};

/// Output of one render invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub view: ViewId,
    pub outcome: Result<Chart, ViewError>,
}

impl Rendered {
    pub fn into_event(self) -> ServerEvent {
        match self.outcome {
            Ok(chart) => ServerEvent::ViewRendered {
                view: self.view,
                chart,
            },
            Err(error) => ServerEvent::ViewFailed {
                view: self.view,
                error: error.into(),
            },
        }
    }
}

pub struct Session {
    dashboard: Arc<Dashboard>,
    state: ControlState,
}

impl Session {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        let state = dashboard.default_state();
        Self { dashboard, state }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Views subscribed to `control`, in page order.
    pub fn subscribers(&self, control: ControlId) -> Vec<ViewId> {
        self.dashboard
            .views()
            .filter(|view| view.depends_on().contains(&control))
            .map(|view| view.id())
            .collect()
    }

    pub fn render_all(&self) -> Vec<Rendered> {
        self.dashboard
            .views()
            .map(|view| self.render(view.id()))
            .collect()
    }

    /// Applies a control change and re-renders its dependents.
    ///
    /// Invalid values are rejected without touching the state. An unchanged
    /// value renders nothing.
    pub fn set_control(
        &mut self,
        control: ControlId,
        value: ControlValue,
    ) -> Result<Vec<Rendered>, ControlError> {
        let spec = self
            .dashboard
            .control(control)
            .ok_or(ControlError::Unregistered(control))?;
        validate(spec, &value)?;

        if !self.state.replace(control, value) {
            debug!(%control, "control value unchanged; skipping render");
            return Ok(Vec::new());
        }

        let dependents = self.subscribers(control);
        debug!(%control, views = dependents.len(), "control changed");
        Ok(dependents.into_iter().map(|view| self.render(view)).collect())
    }

    fn render(&self, view: ViewId) -> Rendered {
        let outcome = self.dashboard.render(view, &self.state);
        if let Err(error) = &outcome {
            warn!(%view, %error, "view render failed");
        }
        Rendered { view, outcome }
    }
}

#[cfg(test)]
#[path = "tests/binding_tests.rs"]
mod tests;
