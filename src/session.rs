//! The editing session: everything the wizard screens share, and the
//! commands a front end sends to drive them.

use derive_more::IsVariant;
use glam::{IVec2, UVec2};
use std::path::Path;

use crate::{
    adjacency::AdjacencyGraph,
    catalog::TileCatalog,
    config::TILE_SIZE_DEFAULT,
    direction::CardinalDirs,
    error::SessionError,
    import,
    masks::MaskAssignment,
    pairing::{Pairing, PairingEngine},
    tile::{Tile, TileGroup, TileIndex},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IsVariant)]
pub enum Stage {
    /// Picking tiles out of the imported tilegroups
    #[default]
    Selection,
    /// Assigning edge masks and solidity
    Masks,
    /// Answering the pairing wizard
    Pairing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectGroup(usize),
    NextGroup,
    PrevGroup,
    MoveHover(IVec2),
    AddHovered,
    RemoveSelected(TileIndex),
    RemoveLast,

    NextTile,
    PrevTile,
    CycleMask(CardinalDirs),
    ToggleNonSolid,

    Confirm,
    Deny,
    RestartPairing,

    NextStage,
    PrevStage,
}

#[derive(Debug)]
pub struct Session {
    tile_size: u32,
    groups: Vec<TileGroup>,
    active_group: Option<usize>,
    hover: UVec2,
    catalog: TileCatalog,
    masks: MaskAssignment,
    pairing: Option<PairingEngine>,
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        return Self::new(TILE_SIZE_DEFAULT);
    }
}

impl Session {
    pub fn new(tile_size: u32) -> Self {
        return Self {
            tile_size,
            groups: Vec::new(),
            active_group: None,
            hover: UVec2::ZERO,
            catalog: TileCatalog::new(),
            masks: MaskAssignment::new(),
            pairing: None,
            stage: Stage::Selection,
        };
    }

    /// Replaces every tilegroup with those of a tileset description.
    /// On error nothing changes.
    pub fn load_tileset(&mut self, path: &Path) -> Result<usize, SessionError> {
        let groups = import::load_tileset(path, self.tile_size)?;
        let count = groups.len();
        if groups.is_empty() {
            log::info!("no tilegroups imported from {}", path.display());
        }
        self.groups = groups;
        self.active_group = (count > 0).then_some(0);
        self.reset_work();
        return Ok(count);
    }

    /// Slices an image into a new tilegroup next to the existing ones
    pub fn load_image(&mut self, path: &Path) -> Result<(), SessionError> {
        let group = import::slice_image(path, self.tile_size)?;
        self.add_group(group);
        return Ok(());
    }

    pub fn add_group(&mut self, group: TileGroup) {
        self.groups.push(group);
        if self.active_group.is_none() {
            self.active_group = Some(self.groups.len() - 1);
            self.hover = UVec2::ZERO;
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<(), SessionError> {
        use Command::*;
        match (self.stage, command) {
            (_, RestartPairing) => self.restart_pairing(),
            (_, NextStage) => return self.next_stage(),
            (_, PrevStage) => self.prev_stage(),

            (Stage::Selection, SelectGroup(index)) => return self.select_group(index),
            (Stage::Selection, NextGroup) => return self.cycle_group(1),
            (Stage::Selection, PrevGroup) => return self.cycle_group(-1),
            (Stage::Selection, MoveHover(delta)) => self.move_hover(delta),
            (Stage::Selection, AddHovered) => {
                if let Some(tile) = self.hovered_tile().cloned() {
                    self.catalog.push(tile)?;
                }
            }
            (Stage::Selection, RemoveSelected(index)) => {
                self.catalog.remove(index)?;
                self.masks.clamp(self.catalog.len());
            }
            (Stage::Selection, RemoveLast) => {
                if let Some(last) = self.catalog.len().checked_sub(1) {
                    self.catalog.remove(last)?;
                    self.masks.clamp(self.catalog.len());
                }
            }

            (Stage::Masks, NextTile) => self.masks.next_tile(self.catalog.len()),
            (Stage::Masks, PrevTile) => self.masks.prev_tile(),
            (Stage::Masks, CycleMask(dir)) => {
                self.masks.cycle_mask(self.catalog.tiles_mut(), dir);
            }
            (Stage::Masks, ToggleNonSolid) => {
                self.masks.toggle_non_solid(self.catalog.tiles_mut());
            }

            (Stage::Pairing, Confirm) => {
                if let Some(engine) = &mut self.pairing {
                    engine.confirm(self.catalog.tiles_mut());
                }
            }
            (Stage::Pairing, Deny) => {
                if let Some(engine) = &mut self.pairing {
                    engine.deny(self.catalog.tiles_mut());
                }
            }

            (stage, command) => log::trace!("ignoring {command:?} during {stage:?}"),
        }
        return Ok(());
    }

    pub fn stage(&self) -> Stage {
        return self.stage;
    }

    pub fn tile_size(&self) -> u32 {
        return self.tile_size;
    }

    pub fn groups(&self) -> &[TileGroup] {
        return &self.groups;
    }

    pub fn active_group_index(&self) -> Option<usize> {
        return self.active_group;
    }

    pub fn active_group(&self) -> Option<&TileGroup> {
        return self.groups.get(self.active_group?);
    }

    /// Cell of the active group under the selection cursor
    pub fn hover(&self) -> UVec2 {
        return self.hover;
    }

    pub fn hovered_tile(&self) -> Option<&Tile> {
        return self.active_group()?.tile_at(self.hover);
    }

    pub fn catalog(&self) -> &TileCatalog {
        return &self.catalog;
    }

    pub fn mask_cursor(&self) -> &MaskAssignment {
        return &self.masks;
    }

    pub fn mask_tile(&self) -> Option<&Tile> {
        return self.masks.current_tile(&self.catalog);
    }

    /// The pair waiting for an answer, if pairing is underway
    pub fn prompt(&self) -> Option<Pairing> {
        if !self.stage.is_pairing() {
            return None;
        }
        return self.pairing.as_ref()?.current();
    }

    pub fn is_pairing_complete(&self) -> bool {
        return self.pairing.as_ref().map_or(false, PairingEngine::is_complete);
    }

    pub fn pairing_progress(&self) -> Option<(usize, usize)> {
        return self.pairing.as_ref().map(|engine| engine.progress(self.catalog.len()));
    }

    pub fn graph(&self) -> AdjacencyGraph<'_> {
        return AdjacencyGraph::new(&self.catalog);
    }

    fn reset_work(&mut self) {
        self.catalog = TileCatalog::new();
        self.masks = MaskAssignment::new();
        self.pairing = None;
        self.hover = UVec2::ZERO;
        self.set_stage(Stage::Selection);
    }

    fn set_stage(&mut self, stage: Stage) {
        if stage != self.stage {
            log::debug!("stage {:?} -> {:?}", self.stage, stage);
            self.stage = stage;
        }
    }

    fn select_group(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.groups.len() || Some(index) == self.active_group {
            return Ok(());
        }
        self.catalog.clear()?;
        self.masks = MaskAssignment::new();
        self.active_group = Some(index);
        self.hover = UVec2::ZERO;
        log::debug!("active tilegroup {}", self.groups[index].name());
        return Ok(());
    }

    fn cycle_group(&mut self, step: isize) -> Result<(), SessionError> {
        let len = self.groups.len() as isize;
        if len == 0 {
            return Ok(());
        }
        let current = self.active_group.map_or(0, |i| i as isize);
        let index = (current + step).rem_euclid(len) as usize;
        return self.select_group(index);
    }

    fn move_hover(&mut self, delta: IVec2) {
        let Some(group) = self.active_group() else {
            return;
        };
        let max = group.dimensions().as_ivec2() - IVec2::ONE;
        let hover = (self.hover.as_ivec2() + delta).clamp(IVec2::ZERO, max.max(IVec2::ZERO));
        self.hover = hover.as_uvec2();
    }

    fn next_stage(&mut self) -> Result<(), SessionError> {
        match self.stage {
            Stage::Selection => {
                if self.active_group.is_none() {
                    return Err(SessionError::NoTilegroupSelected);
                }
                if self.catalog.is_empty() {
                    return Err(SessionError::NoTiles);
                }
                self.masks.clamp(self.catalog.len());
                self.set_stage(Stage::Masks);
            }
            Stage::Masks => {
                if self.catalog.is_empty() {
                    return Err(SessionError::NoTiles);
                }
                self.set_stage(Stage::Pairing);
                self.enter_pairing();
            }
            Stage::Pairing => log::trace!("pairing is the last stage"),
        }
        return Ok(());
    }

    fn prev_stage(&mut self) {
        match self.stage {
            Stage::Selection => {}
            Stage::Masks => self.set_stage(Stage::Selection),
            Stage::Pairing => self.set_stage(Stage::Masks),
        }
    }

    fn enter_pairing(&mut self) {
        self.catalog.lock();
        match &mut self.pairing {
            Some(engine) => {
                engine.resume(&self.catalog);
            }
            None => {
                let (engine, _) = PairingEngine::start(&self.catalog);
                self.pairing = Some(engine);
            }
        }
    }

    fn restart_pairing(&mut self) {
        log::info!("discarding all pairing decisions");
        self.catalog.clear_adjacency();
        self.catalog.unlock();
        self.pairing = None;
        if self.stage.is_pairing() {
            self.enter_pairing();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::CatalogError,
        import::slice_grid,
        pairing::PAIRING_ORDER,
        tile::Mask,
    };
    use std::sync::Arc;
    use CardinalDirs::*;

    fn group(name: &str, width: u32, height: u32) -> TileGroup {
        let image: Arc<Path> = Arc::from(Path::new(name));
        return slice_grid(image, UVec2::new(width, height) * 32, 32).unwrap();
    }

    fn session_with_tiles(count: u32) -> Session {
        let mut session = Session::new(32);
        session.add_group(group("a.png", count, 1));
        for _ in 0..count {
            session.apply(Command::AddHovered).unwrap();
            session.apply(Command::MoveHover(IVec2::X)).unwrap();
        }
        return session;
    }

    #[test]
    fn leaving_selection_needs_tiles() {
        let mut session = Session::new(32);
        assert!(matches!(
            session.apply(Command::NextStage),
            Err(SessionError::NoTilegroupSelected)
        ));
        session.add_group(group("a.png", 2, 2));
        assert!(matches!(session.apply(Command::NextStage), Err(SessionError::NoTiles)));
        assert!(session.stage().is_selection());
    }

    #[test]
    fn hover_is_clamped_to_group() {
        let mut session = Session::new(32);
        session.add_group(group("a.png", 3, 2));
        session.apply(Command::MoveHover(IVec2::new(10, 10))).unwrap();
        assert_eq!(session.hover(), UVec2::new(2, 1));
        session.apply(Command::MoveHover(IVec2::new(-10, 0))).unwrap();
        assert_eq!(session.hover(), UVec2::new(0, 1));
        assert_eq!(session.hovered_tile().map(|t| t.id), Some(4));
    }

    #[test]
    fn selecting_the_same_tile_twice_keeps_one() {
        let mut session = Session::new(32);
        session.add_group(group("a.png", 2, 1));
        session.apply(Command::AddHovered).unwrap();
        session.apply(Command::AddHovered).unwrap();
        assert_eq!(session.catalog().len(), 1);
        session.apply(Command::RemoveLast).unwrap();
        assert!(session.catalog().is_empty());
        session.apply(Command::RemoveLast).unwrap();
    }

    #[test]
    fn switching_group_clears_selection() {
        let mut session = session_with_tiles(2);
        session.add_group(group("b.png", 1, 1));
        session.apply(Command::NextGroup).unwrap();
        assert_eq!(session.active_group().map(TileGroup::name), Some("b.png"));
        assert!(session.catalog().is_empty());
        session.apply(Command::PrevGroup).unwrap();
        assert_eq!(session.active_group_index(), Some(0));
    }

    #[test]
    fn mask_commands_only_apply_in_mask_stage() {
        let mut session = session_with_tiles(2);
        session.apply(Command::CycleMask(Up)).unwrap();
        assert_eq!(session.catalog()[0].masks[Up], Mask::SOLID);

        session.apply(Command::NextStage).unwrap();
        session.apply(Command::NextTile).unwrap();
        session.apply(Command::CycleMask(Up)).unwrap();
        session.apply(Command::ToggleNonSolid).unwrap();
        assert_eq!(session.catalog()[1].masks[Up], Mask::NON_SOLID);
        assert!(session.catalog()[1].non_solid);
        assert_eq!(session.mask_tile().map(|t| t.id), Some(2));
    }

    #[test]
    fn pairing_locks_the_selection() {
        let mut session = session_with_tiles(2);
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::NextStage).unwrap();
        assert!(session.stage().is_pairing());
        assert!(session.prompt().is_some());

        session.apply(Command::PrevStage).unwrap();
        session.apply(Command::PrevStage).unwrap();
        assert!(matches!(
            session.apply(Command::RemoveLast),
            Err(SessionError::Catalog(CatalogError::Locked))
        ));
        assert_eq!(session.catalog().len(), 2);

        session.apply(Command::RestartPairing).unwrap();
        session.apply(Command::RemoveLast).unwrap();
        assert_eq!(session.catalog().len(), 1);
    }

    #[test]
    fn pairing_resumes_where_it_was_left() {
        let mut session = session_with_tiles(2);
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::Confirm).unwrap();
        let prompt = session.prompt();
        assert_eq!(
            prompt,
            Some(Pairing {
                direction: PAIRING_ORDER[0],
                anchor: 0,
                candidate: 1
            })
        );

        session.apply(Command::PrevStage).unwrap();
        assert_eq!(session.prompt(), None);
        session.apply(Command::NextStage).unwrap();
        assert_eq!(session.prompt(), prompt);
    }

    #[test]
    fn answering_every_prompt_completes() {
        let mut session = session_with_tiles(3);
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::NextStage).unwrap();
        let mut answers = 0;
        while session.prompt().is_some() {
            session.apply(Command::Deny).unwrap();
            answers += 1;
        }
        assert!(session.is_pairing_complete());
        // down and right passes ask every pair, up and left are mirrored
        assert_eq!(answers, 2 * 3 * 3);
        assert_eq!(session.pairing_progress(), Some((36, 36)));
        assert!(session.graph().is_consistent());
        assert!(session.graph().is_forbidden(0, 2, Down));
        assert!(session.graph().is_forbidden(2, 0, Up));
    }

    #[test]
    fn restart_discards_decisions() {
        let mut session = session_with_tiles(2);
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::NextStage).unwrap();
        session.apply(Command::Confirm).unwrap();
        session.apply(Command::RestartPairing).unwrap();
        assert!(session.catalog().iter().all(|t| t.neighbors.is_empty()));
        assert_eq!(session.pairing_progress(), Some((0, 16)));
        assert!(session.catalog().is_locked());
    }

    #[test]
    fn failed_import_changes_nothing() {
        let mut session = session_with_tiles(2);
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.strf");
        std::fs::write(&bad, "(supertux-tiles (tiles (width 0)))").unwrap();
        assert!(session.load_tileset(&bad).is_err());
        assert!(session.load_image(&dir.path().join("missing.png")).is_err());
        assert_eq!(session.groups().len(), 1);
        assert_eq!(session.catalog().len(), 2);
    }
}
