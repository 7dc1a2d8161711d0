use autotile_wizard::{CardinalDirs, Command, Stage};
use derive_more::{From, IsVariant};
use glam::IVec2;
use winit::event::VirtualKeyCode as Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, From, IsVariant)]
pub enum Action {
    Apply(Command),
    Quit,
}

/// Keyboard bindings for each screen
pub fn action_for(stage: Stage, key: Key, shift: bool) -> Option<Action> {
    use CardinalDirs::*;
    let command = match (stage, key) {
        (_, Key::Escape) => return Some(Action::Quit),
        (_, Key::PageDown) => Command::NextStage,
        (_, Key::PageUp) => Command::PrevStage,

        (Stage::Selection, Key::Up) => Command::MoveHover(IVec2::from(Up)),
        (Stage::Selection, Key::Left) => Command::MoveHover(IVec2::from(Left)),
        (Stage::Selection, Key::Down) => Command::MoveHover(IVec2::from(Down)),
        (Stage::Selection, Key::Right) => Command::MoveHover(IVec2::from(Right)),
        (Stage::Selection, Key::Return | Key::Space) => Command::AddHovered,
        (Stage::Selection, Key::Back) => Command::RemoveLast,
        (Stage::Selection, Key::Tab) if shift => Command::PrevGroup,
        (Stage::Selection, Key::Tab) => Command::NextGroup,

        (Stage::Masks, Key::Left) => Command::PrevTile,
        (Stage::Masks, Key::Right) => Command::NextTile,
        (Stage::Masks, Key::W) => Command::CycleMask(Up),
        (Stage::Masks, Key::A) => Command::CycleMask(Left),
        (Stage::Masks, Key::S) => Command::CycleMask(Down),
        (Stage::Masks, Key::D) => Command::CycleMask(Right),
        (Stage::Masks, Key::X) => Command::ToggleNonSolid,

        (Stage::Pairing, Key::Y) => Command::Confirm,
        (Stage::Pairing, Key::N) => Command::Deny,
        (Stage::Pairing, Key::R) => Command::RestartPairing,

        _ => return None,
    };
    return Some(command.into());
}
