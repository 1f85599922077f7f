use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::trackball::DEFAULT_DEGENERATE_EPSILON;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Trackball", inline)]
#[serde(default)]
/// Virtual trackball tuning.
pub struct TrackballOptions {
    /// Anchor or axis lengths below this are treated as "no rotation".
    #[schemars(skip)]
    pub degenerate_epsilon: f32,
}

impl Default for TrackballOptions {
    fn default() -> Self {
        Self {
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
        }
    }
}
