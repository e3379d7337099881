//! Substation coordinates used to draw the grid topology

use serde::{Deserialize, Serialize};

/// Position of one substation on the drawing canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstationCoord {
    pub x: i32,
    pub y: i32,
}

/// Ordered substation positions; index `i` is substation `i`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkLayout {
    substations: Vec<SubstationCoord>,
}

impl NetworkLayout {
    /// Build a layout from coordinates in substation order
    pub fn new(substations: Vec<SubstationCoord>) -> Self {
        Self { substations }
    }

    /// Coordinates in substation order
    pub fn substations(&self) -> &[SubstationCoord] {
        &self.substations
    }

    pub fn len(&self) -> usize {
        self.substations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substations.is_empty()
    }
}

impl FromIterator<(i32, i32)> for NetworkLayout {
    fn from_iter<T: IntoIterator<Item = (i32, i32)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(x, y)| SubstationCoord { x, y })
                .collect(),
        )
    }
}
