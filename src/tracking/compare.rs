//! Control/test gesture comparison

use crate::device::types::Hand;
use serde::{Deserialize, Serialize};

/// Absolute difference in visible finger count between two hands
pub fn finger_count_difference(control: &Hand, test: &Hand) -> usize {
    control.fingers.len().abs_diff(test.fingers.len())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub control: Hand,
    pub test: Hand,
    pub finger_count_difference: usize,
}

impl ComparisonReport {
    pub fn new(control: Hand, test: Hand) -> Self {
        let finger_count_difference = finger_count_difference(&control, &test);
        Self {
            control,
            test,
            finger_count_difference,
        }
    }

    /// Fingers match in count
    pub fn is_match(&self) -> bool {
        self.finger_count_difference == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::types::{Finger, Vector};

    fn hand_with_fingers(n: usize) -> Hand {
        Hand {
            id: 1,
            palm_position: Vector::zeros(),
            palm_velocity: Vector::zeros(),
            fingers: (0..n)
                .map(|i| Finger {
                    id: i as i32,
                    tip_position: Vector::new(i as f32 * 20.0, 0.0, 0.0),
                    length: 50.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_difference_is_symmetric() {
        let five = hand_with_fingers(5);
        let two = hand_with_fingers(2);

        assert_eq!(finger_count_difference(&five, &two), 3);
        assert_eq!(finger_count_difference(&two, &five), 3);
    }

    #[test]
    fn test_report_match() {
        let report = ComparisonReport::new(hand_with_fingers(4), hand_with_fingers(4));
        assert!(report.is_match());

        let report = ComparisonReport::new(hand_with_fingers(0), hand_with_fingers(4));
        assert!(!report.is_match());
        assert_eq!(report.finger_count_difference, 4);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ComparisonReport::new(hand_with_fingers(1), hand_with_fingers(3));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["fingerCountDifference"], 2);
        assert_eq!(value["test"]["fingers"].as_array().map(|f| f.len()), Some(3));
    }
}
