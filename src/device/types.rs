use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// 3-D vector in the sensor's native units (millimetres, mm/s)
pub type Vector = Vector3<f32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finger {
    pub id: i32,
    pub tip_position: Vector,
    #[serde(default)]
    pub length: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    pub id: i32,
    pub palm_position: Vector,
    pub palm_velocity: Vector,
    #[serde(default)]
    pub fingers: Vec<Finger>,
}

impl Hand {
    /// Palm displacement since `relative_to`.
    ///
    /// The reference hand is matched by id. Zero when the reference frame
    /// is invalid or does not contain this hand.
    pub fn translation(&self, relative_to: &Frame) -> Vector {
        relative_to
            .hand(self.id)
            .map(|reference| self.palm_position - reference.palm_position)
            .unwrap_or_else(Vector::zeros)
    }

    pub fn leftmost_finger(&self) -> Option<&Finger> {
        self.fingers
            .iter()
            .min_by(|a, b| a.tip_position.x.total_cmp(&b.tip_position.x))
    }

    pub fn rightmost_finger(&self) -> Option<&Finger> {
        self.fingers
            .iter()
            .max_by(|a, b| a.tip_position.x.total_cmp(&b.tip_position.x))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: i64,
    #[serde(default)]
    pub timestamp_us: i64,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub hands: Vec<Hand>,
}

fn default_valid() -> bool {
    true
}

impl Frame {
    /// Sentinel for lookups past the end of the stored history
    pub fn invalid() -> Self {
        Self {
            id: -1,
            timestamp_us: 0,
            valid: false,
            hands: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// First hand of a valid frame
    pub fn first_hand(&self) -> Option<&Hand> {
        if self.valid {
            self.hands.first()
        } else {
            None
        }
    }

    /// Hand with the given id, if the frame is valid and tracks it
    pub fn hand(&self, id: i32) -> Option<&Hand> {
        if !self.valid {
            return None;
        }
        self.hands.iter().find(|h| h.id == id)
    }
}
