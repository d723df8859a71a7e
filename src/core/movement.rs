//=========================================================================
// Movement
//=========================================================================
//
// Player facing/motion state machine and per-frame displacement.
//
// States: Idle, Moving(Up | Down | Left | Right)
//
// transition(held, newly_pressed):
//   1. a direction pressed this frame (and still held) wins
//   2. else keep the current direction while it is held
//   3. else the first held direction in Up, Down, Left, Right order
//   4. else Idle
//
// The state only chooses a facing. Displacement sums every held
// direction, so diagonals move on both axes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collision::{Body, HitboxOffsets, Movable};
use crate::core::contracts::InputQuery;

/// Walking speed in pixels per second.
pub const PLAYER_SPEED: f32 = 240.0;

/// Player sprite size in pixels.
pub const PLAYER_SIZE: (f32, f32) = (48.0, 64.0);

/// Player collision inset: narrower sides, head excluded.
pub const PLAYER_HITBOX: HitboxOffsets = HitboxOffsets { left: -0.1, right: -0.1, top: -0.3, bottom: 0.0 };

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Priority order for falling back to a held direction.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Bound action name in the `game` profile.
    pub fn action(self) -> &'static str {
        match self {
            Self::Up => "move_up",
            Self::Down => "move_down",
            Self::Left => "move_left",
            Self::Right => "move_right",
        }
    }

    /// Unit vector, Y-up.
    pub fn unit(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

//=== DirectionSet ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionSet([bool; 4]);

impl DirectionSet {
    pub fn of(directions: &[Direction]) -> Self {
        let mut set = Self::default();
        for &direction in directions {
            set.insert(direction);
        }
        set
    }

    /// Directions whose move action is held.
    pub fn held(input: &dyn InputQuery) -> Self {
        Self::from_fn(|d| input.action(d.action()))
    }

    /// Directions whose move action went down this frame.
    pub fn pressed(input: &dyn InputQuery) -> Self {
        Self::from_fn(|d| input.action_pressed(d.action()))
    }

    fn from_fn(mut f: impl FnMut(Direction) -> bool) -> Self {
        let mut set = Self::default();
        for direction in Direction::ALL {
            if f(direction) {
                set.insert(direction);
            }
        }
        set
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0[direction.index()] = true;
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&held| held)
    }

    /// Members in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

//=== MovementState =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Moving(Direction),
}

impl MovementState {
    pub fn transition(self, held: DirectionSet, newly_pressed: DirectionSet) -> Self {
        if let Some(direction) = newly_pressed.iter().find(|d| held.contains(*d)) {
            return Self::Moving(direction);
        }

        if let Self::Moving(current) = self {
            if held.contains(current) {
                return self;
            }
        }

        held.iter().next().map_or(Self::Idle, Self::Moving)
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Idle => None,
            Self::Moving(direction) => Some(direction),
        }
    }
}

//=== Displacement ========================================================

/// Sum of held directions scaled to `speed * dt`.
pub fn displacement(held: DirectionSet, speed: f32, dt: f32) -> (f32, f32) {
    held.iter().fold((0.0, 0.0), |(dx, dy), direction| {
        let (ux, uy) = direction.unit();
        (dx + ux * speed * dt, dy + uy * speed * dt)
    })
}

//=== Avatar ==============================================================

/// Player body moved by the collision resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub center: (f32, f32),
    pub size: (f32, f32),
    pub state: MovementState,
}

impl Avatar {
    pub fn at(x: f32, y: f32) -> Self {
        Self { center: (x, y), size: PLAYER_SIZE, state: MovementState::Idle }
    }
}

impl Body for Avatar {
    fn center(&self) -> (f32, f32) {
        self.center
    }

    fn size(&self) -> (f32, f32) {
        self.size
    }
}

impl Movable for Avatar {
    fn translate(&mut self, dx: f32, dy: f32) {
        self.center.0 += dx;
        self.center.1 += dy;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
