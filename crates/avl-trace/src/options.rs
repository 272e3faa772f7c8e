use serde::{Deserialize, Serialize};

/// Tree behaviour switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Emit an info message for every left/right step of the descent.
    pub trace_descent: bool,
}

impl TreeOptions {
    pub fn with_descent(mut self, on: bool) -> Self {
        self.trace_descent = on;
        self
    }
}
