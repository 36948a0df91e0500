//! Decorative layer: grass, flowers, props and interior furniture.
//!
//! Nothing here takes part in the simulation. The grass layer is generated
//! from a fixed linear congruential sequence so every run looks the same.
use common::{Point, Rect, WORLD_HEIGHT, WORLD_WIDTH};

/// Seed of the decorative sequence.
pub const SCENERY_SEED: u32 = 12345;
const GRASS_STEP: usize = 8;
const FLOWER_COUNT: usize = 20;
const BLADES_PER_PATCH: usize = 3;

/// Linear congruential generator yielding values in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SeededLcg {
    state: u32,
}

impl SeededLcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f32(&mut self) -> f32 {
        self.state = (self.state * 9301 + 49297) % 233280;
        self.state as f32 / 233280.0
    }
}

/// Shade of a grass patch, darkest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrassShade {
    Light,
    Medium,
    Dark,
    Deep,
}

const SHADES: [GrassShade; 4] = [
    GrassShade::Light,
    GrassShade::Medium,
    GrassShade::Dark,
    GrassShade::Deep,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Blade {
    pub position: Point,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GrassPatch {
    pub origin: Point,
    pub shade: GrassShade,
    pub blades: Vec<Blade>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowerColor {
    Orange,
    Red,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    pub position: Point,
    pub color: FlowerColor,
}

/// Kind of a static world prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropKind {
    Tree,
    Rock,
    Bush,
}

impl PropKind {
    fn size(self) -> (f32, f32) {
        match self {
            PropKind::Tree => (30.0, 40.0),
            PropKind::Rock => (20.0, 15.0),
            PropKind::Bush => (25.0, 20.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub bounds: Rect,
}

const TREES: [(f32, f32); 9] = [
    (50.0, 50.0),
    (200.0, 80.0),
    (350.0, 120.0),
    (500.0, 60.0),
    (700.0, 200.0),
    (150.0, 300.0),
    (600.0, 350.0),
    (300.0, 450.0),
    (750.0, 500.0),
];
const ROCKS: [(f32, f32); 6] = [
    (100.0, 200.0),
    (450.0, 250.0),
    (650.0, 400.0),
    (250.0, 350.0),
    (550.0, 150.0),
    (150.0, 500.0),
];
const BUSHES: [(f32, f32); 5] = [
    (300.0, 200.0),
    (500.0, 400.0),
    (100.0, 400.0),
    (700.0, 300.0),
    (400.0, 500.0),
];

/// Outdoor decoration, generated once per renderer.
#[derive(Clone, Debug)]
pub struct Scenery {
    pub grass: Vec<GrassPatch>,
    pub flowers: Vec<Flower>,
    pub props: Vec<Prop>,
}

impl Scenery {
    /// Generates the decoration for the standard map size.
    pub fn generate() -> Self {
        Self::generate_sized(WORLD_WIDTH as usize, WORLD_HEIGHT as usize)
    }

    pub fn generate_sized(width: usize, height: usize) -> Self {
        let mut rng = SeededLcg::new(SCENERY_SEED);
        let mut grass = Vec::new();
        for x in (0..width).step_by(GRASS_STEP) {
            for y in (0..height).step_by(GRASS_STEP) {
                if rng.next_f32() > 0.6 {
                    let shade = SHADES[(rng.next_f32() * SHADES.len() as f32) as usize];
                    let blades = (0..BLADES_PER_PATCH)
                        .map(|_| {
                            let bx = x as f32 + rng.next_f32() * 6.0;
                            let by = y as f32 + rng.next_f32() * 6.0;
                            Blade {
                                position: Point::new(bx, by),
                                height: 2.0 + rng.next_f32() * 2.0,
                            }
                        })
                        .collect();
                    grass.push(GrassPatch {
                        origin: Point::new(x as f32, y as f32),
                        shade,
                        blades,
                    });
                }
            }
        }
        let flowers = (0..FLOWER_COUNT)
            .map(|_| {
                let fx = rng.next_f32() * width as f32;
                let fy = rng.next_f32() * height as f32;
                let color = if rng.next_f32() > 0.5 {
                    FlowerColor::Orange
                } else {
                    FlowerColor::Red
                };
                Flower {
                    position: Point::new(fx, fy),
                    color,
                }
            })
            .collect();
        Self {
            grass,
            flowers,
            props: props(),
        }
    }
}

fn props() -> Vec<Prop> {
    let place = |kind: PropKind, spots: &[(f32, f32)]| -> Vec<Prop> {
        let (w, h) = kind.size();
        spots
            .iter()
            .map(|&(x, y)| Prop {
                kind,
                bounds: Rect::new(x, y, w, h),
            })
            .collect()
    };
    let mut all = place(PropKind::Tree, &TREES);
    all.extend(place(PropKind::Rock, &ROCKS));
    all.extend(place(PropKind::Bush, &BUSHES));
    all
}

/// Furniture pieces of the home interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FurnitureKind {
    Window,
    Fireplace,
    Bed,
    Table,
    Chair,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Furniture {
    pub kind: FurnitureKind,
    pub bounds: Rect,
}

/// Fixed interior layout, excluding the door.
pub fn interior_furniture() -> Vec<Furniture> {
    use FurnitureKind::*;
    [
        (Window, Rect::new(100.0, 100.0, 120.0, 80.0)),
        (Fireplace, Rect::new(600.0, 200.0, 120.0, 150.0)),
        (Bed, Rect::new(200.0, 350.0, 150.0, 100.0)),
        (Table, Rect::new(450.0, 300.0, 100.0, 60.0)),
        (Chair, Rect::new(480.0, 380.0, 40.0, 60.0)),
    ]
    .into_iter()
    .map(|(kind, bounds)| Furniture { kind, bounds })
    .collect()
}
