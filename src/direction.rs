use glam::IVec2;
use std::{
    ops::{Index, IndexMut, Neg},
    slice::Iter,
};

/// One of the four sides of a tile.
///
/// Per-direction data is stored in `[T; 4]` arrays indexed in the order
/// `up, left, down, right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalDirs {
    Up,
    Left,
    Down,
    Right,
}

impl CardinalDirs {
    pub fn iter() -> Iter<'static, Self> {
        return [Self::Up, Self::Left, Self::Down, Self::Right].iter();
    }

    pub fn name(self) -> &'static str {
        match self {
            CardinalDirs::Up => "up",
            CardinalDirs::Left => "left",
            CardinalDirs::Down => "down",
            CardinalDirs::Right => "right",
        }
    }
}

/// Returns the opposite direction
impl Neg for CardinalDirs {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            CardinalDirs::Up => Self::Down,
            CardinalDirs::Left => Self::Right,
            CardinalDirs::Right => Self::Left,
            CardinalDirs::Down => Self::Up,
        }
    }
}

impl From<CardinalDirs> for usize {
    fn from(value: CardinalDirs) -> Self {
        match value {
            CardinalDirs::Up => 0,
            CardinalDirs::Left => 1,
            CardinalDirs::Down => 2,
            CardinalDirs::Right => 3,
        }
    }
}

/// Screen-space offset, y grows downwards
impl From<CardinalDirs> for IVec2 {
    fn from(value: CardinalDirs) -> Self {
        match value {
            CardinalDirs::Up => IVec2 { x: 0, y: -1 },
            CardinalDirs::Left => IVec2 { x: -1, y: 0 },
            CardinalDirs::Right => IVec2 { x: 1, y: 0 },
            CardinalDirs::Down => IVec2 { x: 0, y: 1 },
        }
    }
}

impl<T> Index<CardinalDirs> for [T; 4] {
    type Output = T;

    fn index(&self, index: CardinalDirs) -> &Self::Output {
        let index: usize = index.into();
        return &self[index];
    }
}

impl<T> IndexMut<CardinalDirs> for [T; 4] {
    fn index_mut(&mut self, index: CardinalDirs) -> &mut Self::Output {
        let index: usize = index.into();
        return &mut self[index];
    }
}
