//! Level (track) definitions and the built-in sample levels

use serde::{Deserialize, Serialize};

use super::obstacle::{ObstacleKind, ObstacleSpec};
use crate::color::Rgb;

/// An authored track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    /// Distance at which the track ends; zero means undeclared
    #[serde(default)]
    pub length: f32,
    /// Not necessarily sorted by x
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl Level {
    pub fn new(id: impl Into<String>, name: impl Into<String>, length: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length,
            obstacles: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, spec: ObstacleSpec) -> Self {
        self.obstacles.push(spec);
        self
    }

    /// Declared length, or `fallback` when the level declares none
    pub fn length_or(&self, fallback: f32) -> f32 {
        if self.length > 0.0 { self.length } else { fallback }
    }

    /// Label shown in the level picker
    pub fn menu_label(&self) -> String {
        let secs = (self.length_or(2000.0) / 1000.0).floor() as u32;
        format!("{} — {}s", self.name, secs)
    }
}

fn block(x: f32, w: f32, h: f32, color: u32) -> ObstacleSpec {
    ObstacleSpec::new(ObstacleKind::Block, x, w, h).with_color(Rgb(color))
}

fn spike(x: f32, w: f32, h: f32, color: u32) -> ObstacleSpec {
    ObstacleSpec::new(ObstacleKind::Spike, x, w, h).with_color(Rgb(color))
}

fn gap(x: f32, w: f32) -> ObstacleSpec {
    ObstacleSpec::new(ObstacleKind::Gap, x, w, 80.0)
}

/// The three levels shipped with the game
pub fn sample_levels() -> Vec<Level> {
    vec![
        Level {
            id: "level-1".into(),
            name: "Sunny Start".into(),
            length: 3500.0,
            obstacles: vec![
                block(700.0, 140.0, 90.0, 0xff9f80),
                gap(980.0, 120.0),
                block(1160.0, 80.0, 70.0, 0xffcc66),
                spike(1350.0, 140.0, 64.0, 0xffd166),
                gap(1620.0, 140.0),
                block(1820.0, 220.0, 110.0, 0xff6b6b),
                spike(2200.0, 160.0, 72.0, 0x9b8cff),
                gap(2460.0, 200.0),
            ],
        },
        Level {
            id: "level-2".into(),
            name: "Bouncy Blocks".into(),
            length: 4200.0,
            obstacles: vec![
                block(600.0, 80.0, 60.0, 0x7efc6a),
                block(740.0, 120.0, 120.0, 0x4cc0ff),
                gap(900.0, 160.0),
                spike(1100.0, 140.0, 64.0, 0xff6b6b),
                block(1300.0, 200.0, 80.0, 0xffd166),
                gap(1600.0, 120.0),
                block(1760.0, 150.0, 110.0, 0x9b8cff),
                spike(2100.0, 160.0, 72.0, 0xff9f80),
                block(2380.0, 220.0, 140.0, 0x7efc6a),
            ],
        },
        Level {
            id: "level-3".into(),
            name: "Spiky Rush".into(),
            length: 2800.0,
            obstacles: vec![
                spike(700.0, 180.0, 80.0, 0xff6b6b),
                gap(920.0, 120.0),
                spike(1100.0, 160.0, 72.0, 0xff9f80),
                block(1300.0, 120.0, 90.0, 0xffd166),
                gap(1540.0, 160.0),
                spike(1760.0, 240.0, 90.0, 0x9b8cff),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_well_formed() {
        for level in sample_levels() {
            for o in &level.obstacles {
                assert!(o.x >= 0.0 && o.x < level.length, "{} {:?}", level.id, o);
                assert!(o.width > 0.0);
            }
        }
    }

    #[test]
    fn menu_label_uses_whole_seconds() {
        let levels = sample_levels();
        assert_eq!(levels[0].menu_label(), "Sunny Start — 3s");
        assert_eq!(Level::new("x", "Blank", 0.0).menu_label(), "Blank — 2s");
    }

    #[test]
    fn parses_level_json() {
        let json = r##"{
            "id": "custom-1", "name": "Mine", "length": 1800,
            "obstacles": [{"type":"block","x":300,"w":60,"h":40,"color":"#7efc6a"}]
        }"##;
        let level: Level = serde_json::from_str(json).unwrap();
        assert_eq!(level.obstacles.len(), 1);
        assert_eq!(level.obstacles[0].color, Rgb(0x7efc6a));
        assert_eq!(level.length_or(2200.0), 1800.0);
    }
}
