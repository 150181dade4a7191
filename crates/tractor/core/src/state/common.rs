use std::fmt;
use std::time::Duration;

/// Width and height of one tile, in pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Unique identifier for an entity (actor, vehicle, animal, monster) in the host world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a location (farm, mine level, barn interior, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "location:{}", self.0)
    }
}

/// Discrete grid cell expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shifts by `(dx, dy)`, saturating at the `i32` bounds.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Top-left pixel of this tile.
    pub fn to_pixel(self) -> PixelPos {
        PixelPos::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    /// Pixel at the center of this tile, where tools are aimed.
    pub fn center_pixel(self) -> PixelPos {
        let half = TILE_SIZE / 2.0;
        PixelPos::new(
            self.x as f32 * TILE_SIZE + half,
            self.y as f32 * TILE_SIZE + half,
        )
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous position in pixels within a location.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    /// A position far outside any playable area.
    pub const OFFSCREEN: Self = Self {
        x: -10_000.0,
        y: -10_000.0,
    };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Tile containing this pixel.
    pub fn to_tile(self) -> TilePos {
        TilePos::new(
            (self.x / TILE_SIZE).floor() as i32,
            (self.y / TILE_SIZE).floor() as i32,
        )
    }
}

/// Cardinal facing direction.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl Direction {
    /// Direction an actor standing on `from` must face to look at `to`.
    ///
    /// The dominant axis wins; ties prefer the vertical axis. A zero offset
    /// keeps the default facing.
    pub fn toward(from: TilePos, to: TilePos) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return Self::default();
        }
        if dy.abs() >= dx.abs() {
            if dy < 0 { Self::Up } else { Self::Down }
        } else if dx < 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Elapsed simulation time.
///
/// Hosts advance this only while the simulation runs, so anything gated on it
/// (cooldowns in particular) stays consistent across pauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(Duration);

impl SimTime {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub const fn new(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub const fn elapsed(self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: SimTime) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<Duration> for SimTime {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_round_trips_through_tile_origin() {
        let tile = TilePos::new(3, -2);
        assert_eq!(tile.to_pixel().to_tile(), tile);
        assert_eq!(tile.center_pixel().to_tile(), tile);
    }

    #[test]
    fn negative_pixels_floor_into_negative_tiles() {
        assert_eq!(PixelPos::new(-1.0, -64.5).to_tile(), TilePos::new(-1, -2));
    }

    #[test]
    fn toward_prefers_dominant_axis() {
        let origin = TilePos::ORIGIN;
        assert_eq!(Direction::toward(origin, TilePos::new(0, -1)), Direction::Up);
        assert_eq!(Direction::toward(origin, TilePos::new(2, 1)), Direction::Right);
        assert_eq!(Direction::toward(origin, TilePos::new(-3, 1)), Direction::Left);
        assert_eq!(Direction::toward(origin, TilePos::new(1, 1)), Direction::Down);
        assert_eq!(Direction::toward(origin, origin), Direction::Down);
    }

    #[test]
    fn sim_time_since_saturates() {
        let early = SimTime::from_millis(100);
        let late = SimTime::from_millis(350);
        assert_eq!(late.since(early), Duration::from_millis(250));
        assert_eq!(early.since(late), Duration::ZERO);
    }
}
