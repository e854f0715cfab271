use crate::{
    animation::ease::{lerp, smootherstep},
    foundation::core::Point,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One authored pose sample on an annotation's motion path.
pub struct Keyframe {
    /// Media time in seconds.
    pub time: f64,
    /// Authored-space x.
    pub x: f64,
    /// Authored-space y.
    pub y: f64,
    /// Rotation in degrees, if this key overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Horizontal scale, if this key overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Vertical scale, if this key overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

impl Keyframe {
    /// Position-only key.
    pub fn at(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            x,
            y,
            rotation: None,
            scale_x: None,
            scale_y: None,
        }
    }
}

/// Pose produced by [`interpolate`]. Optional fields stay `None` when the keys don't define them,
/// so the caller falls back to the annotation's static values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframePose {
    /// Authored-space position.
    pub position: Point,
    /// Rotation in degrees.
    pub rotation: Option<f64>,
    /// Horizontal scale.
    pub scale_x: Option<f64>,
    /// Vertical scale.
    pub scale_y: Option<f64>,
}

impl From<&Keyframe> for KeyframePose {
    fn from(k: &Keyframe) -> Self {
        Self {
            position: Point::new(k.x, k.y),
            rotation: k.rotation,
            scale_x: k.scale_x,
            scale_y: k.scale_y,
        }
    }
}

/// Stable ascending sort by time, so duplicate times keep their authored order.
pub fn sort_keyframes(keys: &mut [Keyframe]) {
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// Sample a sorted keyframe sequence at time `t`.
///
/// Returns `None` for an empty sequence. Outside the keyed range the nearest end key is returned
/// verbatim. Inside, the first bracketing pair in ascending order is blended with
/// [`smootherstep`]; rotation and scale blend only when both keys define them and otherwise
/// take the earlier key's value.
pub fn interpolate(keys: &[Keyframe], t: f64) -> Option<KeyframePose> {
    let first = keys.first()?;
    let last = keys.last()?;

    if t <= first.time {
        return Some(first.into());
    }
    if t >= last.time {
        return Some(last.into());
    }

    let Some(pair) = keys
        .windows(2)
        .find(|w| w[0].time <= t && t <= w[1].time)
    else {
        // Only reachable for NaN times.
        return Some(first.into());
    };
    let (k1, k2) = (&pair[0], &pair[1]);

    let span = k2.time - k1.time;
    if span == 0.0 {
        return Some(k2.into());
    }

    let e = smootherstep((t - k1.time) / span);
    Some(KeyframePose {
        position: Point::new(lerp(k1.x, k2.x, e), lerp(k1.y, k2.y, e)),
        rotation: blend_optional(k1.rotation, k2.rotation, e),
        scale_x: blend_optional(k1.scale_x, k2.scale_x, e),
        scale_y: blend_optional(k1.scale_y, k2.scale_y, e),
    })
}

fn blend_optional(a: Option<f64>, b: Option<f64>, e: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, e)),
        _ => a,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
