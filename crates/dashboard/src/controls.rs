use std::collections::BTreeMap;

use shared::domain::{ControlId, ControlKind, ControlSpec, ControlValue};

use crate::error::{ControlError, ViewError};

pub fn select(
    id: ControlId,
    label: &str,
    options: Vec<String>,
    preferred: Option<&str>,
) -> ControlSpec {
    let default = preferred
        .filter(|preferred| options.iter().any(|option| option.as_str() == *preferred))
        .map(str::to_string)
        .or_else(|| options.first().cloned())
        .unwrap_or_default();
    ControlSpec {
        id,
        label: label.to_string(),
        kind: ControlKind::Select { options },
        default: ControlValue::Select(default),
    }
}

pub fn checkbox(id: ControlId, label: &str, default: bool) -> ControlSpec {
    ControlSpec {
        id,
        label: label.to_string(),
        kind: ControlKind::Checkbox,
        default: ControlValue::Checkbox(default),
    }
}

pub fn range_slider(id: ControlId, label: &str, bounds: (i32, i32), default: (i32, i32)) -> ControlSpec {
    ControlSpec {
        id,
        label: label.to_string(),
        kind: ControlKind::RangeSlider {
            start: bounds.0,
            end: bounds.1,
        },
        default: ControlValue::Range(default.0, default.1),
    }
}

/// Checks `value` against the kind and bounds declared by `spec`.
pub fn validate(spec: &ControlSpec, value: &ControlValue) -> Result<(), ControlError> {
    match (&spec.kind, value) {
        (ControlKind::Select { options }, ControlValue::Select(choice)) => {
            if options.iter().any(|option| option == choice) {
                Ok(())
            } else {
                Err(ControlError::NotAnOption {
                    control: spec.id,
                    value: choice.clone(),
                })
            }
        }
        (ControlKind::Checkbox, ControlValue::Checkbox(_)) => Ok(()),
        (ControlKind::RangeSlider { start: min, end: max }, ControlValue::Range(start, end)) => {
            if min <= start && start <= end && end <= max {
                Ok(())
            } else {
                Err(ControlError::OutOfRange {
                    control: spec.id,
                    start: *start,
                    end: *end,
                    min: *min,
                    max: *max,
                })
            }
        }
        (kind, value) => Err(ControlError::WrongKind {
            control: spec.id,
            expected: kind_name(kind),
            actual: value.kind_name(),
        }),
    }
}

fn kind_name(kind: &ControlKind) -> &'static str {
    match kind {
        ControlKind::Select { .. } => "select",
        ControlKind::Checkbox => "checkbox",
        ControlKind::RangeSlider { .. } => "range",
    }
}

/// Current value of every control in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    values: BTreeMap<ControlId, ControlValue>,
}

impl ControlState {
    pub fn from_defaults(specs: &[ControlSpec]) -> Self {
        Self {
            values: specs
                .iter()
                .map(|spec| (spec.id, spec.default.clone()))
                .collect(),
        }
    }

    /// Defaults with validated overrides applied on top.
    pub fn with_overrides(
        specs: &[ControlSpec],
        overrides: &BTreeMap<ControlId, ControlValue>,
    ) -> Result<Self, ControlError> {
        let mut state = Self::from_defaults(specs);
        for (id, value) in overrides {
            let spec = specs
                .iter()
                .find(|spec| spec.id == *id)
                .ok_or(ControlError::Unregistered(*id))?;
            validate(spec, value)?;
            state.values.insert(*id, value.clone());
        }
        Ok(state)
    }

    pub fn get(&self, id: ControlId) -> Option<&ControlValue> {
        self.values.get(&id)
    }

    /// Stores `value`, returning whether it differs from the previous one.
    pub(crate) fn replace(&mut self, id: ControlId, value: ControlValue) -> bool {
        match self.values.get(&id) {
            Some(current) if *current == value => false,
            _ => {
                self.values.insert(id, value);
                true
            }
        }
    }

    pub fn select(&self, id: ControlId) -> Result<&str, ViewError> {
        match self.values.get(&id) {
            Some(ControlValue::Select(choice)) => Ok(choice),
            _ => Err(ViewError::MissingControl(id)),
        }
    }

    pub fn checkbox(&self, id: ControlId) -> Result<bool, ViewError> {
        match self.values.get(&id) {
            Some(ControlValue::Checkbox(checked)) => Ok(*checked),
            _ => Err(ViewError::MissingControl(id)),
        }
    }

    pub fn range(&self, id: ControlId) -> Result<(i32, i32), ViewError> {
        match self.values.get(&id) {
            Some(ControlValue::Range(start, end)) => Ok((*start, *end)),
            _ => Err(ViewError::MissingControl(id)),
        }
    }
}
