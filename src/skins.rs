//! Cube skins: a base color and the faces the cube may wear

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Facial expression drawn on the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[default]
    Happy,
    Wink,
    Cool,
    Surprised,
    Determined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub color: Rgb,
    pub faces: &'static [Face],
}

impl Skin {
    /// Pick one of this skin's faces
    pub fn random_face<R: Rng>(&self, rng: &mut R) -> Face {
        if self.faces.is_empty() {
            return Face::Happy;
        }
        self.faces[rng.random_range(0..self.faces.len())]
    }

    /// Color used for the skin's particle bursts
    pub fn particle_color(&self) -> Rgb {
        self.color.lighten(12)
    }
}

pub const SKINS: &[Skin] = &[
    Skin {
        id: "sunny",
        name: "Sunny",
        color: Rgb(0xffd166),
        faces: &[Face::Happy, Face::Wink, Face::Cool],
    },
    Skin {
        id: "rose",
        name: "Rose",
        color: Rgb(0xff6b6b),
        faces: &[Face::Happy, Face::Determined, Face::Surprised],
    },
    Skin {
        id: "mint",
        name: "Mint",
        color: Rgb(0x7efc6a),
        faces: &[Face::Happy, Face::Cool],
    },
    Skin {
        id: "violet",
        name: "Violet",
        color: Rgb(0x9b8cff),
        faces: &[Face::Determined, Face::Wink],
    },
    Skin {
        id: "classic",
        name: "Classic",
        color: Rgb(0x4cc0ff),
        faces: &[Face::Happy, Face::Surprised, Face::Wink, Face::Cool],
    },
];

/// Look up a skin by id, falling back to the first skin
pub fn skin_by_id(id: &str) -> &'static Skin {
    SKINS.iter().find(|s| s.id == id).unwrap_or(&SKINS[0])
}
