//! Support modules for release-note labelling behavioural tests.

pub(crate) mod state;

pub(crate) use state::{LabelingState, PR_NUMBER, StepResult};
