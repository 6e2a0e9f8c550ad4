//! A playable BMF instance: toggles, solved tracking, hints, the editor and snapshots.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bmf::codec::{self, DecodeError};
use crate::bmf::generator::generate_target;
use crate::bmf::matrix::{BitMatrix, Mode};
use crate::bmf::settings::{BmfSettings, SettingsError};
use crate::bmf::state::{PlayerState, Selector};
use crate::SolveTransition;

/// Reasons a [`BmfSession`] may refuse an action. The session is never changed when one is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BmfError {
    /// A row or column selector index past the board side.
    #[error("toggle index {index} is outside a board of side {n}")]
    ToggleOutOfRange {
        /// The index given.
        index: usize,
        /// The board side.
        n: usize,
    },
    /// A layer index past the rank.
    #[error("layer {layer} does not exist; there are {r} layers")]
    LayerOutOfRange {
        /// The layer given.
        layer: usize,
        /// The number of layers.
        r: usize,
    },
    /// A puzzle code that could not be read.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Settings outside the supported ranges.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// A snapshot whose matrices do not have the shapes its settings call for.
    #[error("snapshot shapes do not match its settings")]
    SnapshotShape,
}

/// How a tile relates to the target, from the point of view of one layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TileHint {
    /// Covered by the layer, and it should be.
    Good,
    /// Covered by the layer, but it should not be.
    Bad,
    /// Not covered by the layer, but covering it would help.
    Want,
    /// Not covered, and nothing to do here.
    Zero,
}

/// A serializable copy of everything a save needs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BmfSnapshot {
    /// Checked again on restore.
    pub settings: BmfSettings,
    /// The target, row by row.
    pub target: Vec<Vec<bool>>,
    /// Row selectors, one row per layer.
    pub u: Vec<Vec<bool>>,
    /// Column selectors, one row per layer.
    pub v: Vec<Vec<bool>>,
    /// The selected layer.
    pub cur: usize,
    /// Whether the instance had been solved before the snapshot was taken.
    pub was_solved: bool,
}

#[derive(Clone, Debug)]
struct EditorBackup {
    settings: BmfSettings,
    target: BitMatrix,
    state: PlayerState,
    solved: bool,
    was_solved: bool,
}

/// One BMF puzzle instance being played.
///
/// Settings, target and player state are replaced together, so the player state always has `r` layers of side `n`.
#[derive(Clone, Debug)]
pub struct BmfSession {
    settings: BmfSettings,
    target: BitMatrix,
    state: PlayerState,
    solved: bool,
    was_solved: bool,
    editor: Option<EditorBackup>,
}

impl BmfSession {
    /// Start a new instance with a freshly generated target.
    pub fn new<R: Rng + ?Sized>(settings: BmfSettings, rng: &mut R) -> Self {
        Self::from_parts(settings, generate_target(&settings, rng))
    }

    /// Start an instance on a known target. Returns [`None`] if the target's side disagrees with `settings`.
    pub fn with_target(settings: BmfSettings, target: BitMatrix) -> Option<Self> {
        (target.side() == settings.n()).then(|| Self::from_parts(settings, target))
    }

    /// Start an instance from a puzzle code.
    pub fn from_code(code: &str) -> Result<Self, DecodeError> {
        let (settings, target) = codec::decode(code)?;
        Ok(Self::from_parts(settings, target))
    }

    fn from_parts(settings: BmfSettings, target: BitMatrix) -> Self {
        Self {
            state: PlayerState::new(&settings),
            settings,
            target,
            solved: false,
            was_solved: false,
            editor: None,
        }
    }

    /// The settings of this instance.
    #[inline]
    pub fn settings(&self) -> &BmfSettings {
        &self.settings
    }

    /// The matrix to reproduce.
    #[inline]
    pub fn target(&self) -> &BitMatrix {
        &self.target
    }

    /// The player's selectors.
    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// The selected layer.
    #[inline]
    pub fn current_layer(&self) -> usize {
        self.state.cur()
    }

    /// Whether the composed player matrix currently equals the target.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether this instance has ever been solved.
    #[inline]
    pub fn was_solved(&self) -> bool {
        self.was_solved
    }

    /// Whether the editor is open.
    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// The player's composed matrix.
    pub fn player_matrix(&self) -> BitMatrix {
        self.state.compose(self.settings.mode())
    }

    /// Replace the instance with a freshly generated one using the same settings.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let settings = self.settings;
        self.replace(settings, generate_target(&settings, rng));
    }

    /// Change the settings. Outside the editor this generates a new instance; inside it only reshapes the player state.
    pub fn set_settings<R: Rng + ?Sized>(&mut self, settings: BmfSettings, rng: &mut R) {
        if self.is_editing() {
            if settings.n() != self.settings.n() || settings.r() != self.settings.r() {
                self.target = BitMatrix::zeros(settings.n());
                self.state = PlayerState::new(&settings);
            }
            self.settings = settings;
            return;
        }

        self.replace(settings, generate_target(&settings, rng));
    }

    /// Change only the combine mode; see [`Self::set_settings`].
    pub fn set_mode<R: Rng + ?Sized>(&mut self, mode: Mode, rng: &mut R) {
        let settings = BmfSettings::clamped(self.settings.n(), self.settings.r(), mode);
        self.set_settings(settings, rng);
    }

    fn replace(&mut self, settings: BmfSettings, target: BitMatrix) {
        debug!("new {}x{} instance, r = {}, {:?}", settings.n(), settings.n(), settings.r(), settings.mode());
        self.settings = settings;
        self.target = target;
        self.state = PlayerState::new(&settings);
        self.solved = false;
        self.was_solved = false;
    }

    /// Flip one bit of the current layer's row or column selector, then re-check the solution.
    pub fn toggle(&mut self, selector: Selector, index: usize) -> Result<SolveTransition, BmfError> {
        if !self.state.toggle(selector, index) {
            return Err(BmfError::ToggleOutOfRange { index, n: self.settings.n() });
        }

        Ok(self.recheck())
    }

    /// Select a layer, then re-check the solution.
    pub fn select_layer(&mut self, layer: usize) -> Result<SolveTransition, BmfError> {
        if !self.state.select_layer(layer) {
            return Err(BmfError::LayerOutOfRange { layer, r: self.settings.r() });
        }

        Ok(self.recheck())
    }

    /// Zero every toggle, then re-check the solution.
    pub fn clear(&mut self) -> SolveTransition {
        self.state.clear();
        self.recheck()
    }

    fn recheck(&mut self) -> SolveTransition {
        if self.is_editing() {
            return SolveTransition::Unchanged;
        }

        let now_solved = self.player_matrix() == self.target;
        match (self.solved, now_solved) {
            (false, true) => {
                self.solved = true;
                let first = !self.was_solved;
                self.was_solved = true;
                SolveTransition::Solved { first }
            }
            (true, false) => {
                self.solved = false;
                SolveTransition::Unsolved
            }
            _ => SolveTransition::Unchanged,
        }
    }

    /// Classify tile `(i, j)` for display, from the point of view of the current layer.
    pub fn hint(&self, i: usize, j: usize) -> Option<TileHint> {
        self.hint_for_layer(self.state.cur(), i, j)
    }

    /// Classify tile `(i, j)` as seen from `layer`. [`None`] when the tile or the layer is off the board.
    pub fn hint_for_layer(&self, layer: usize, i: usize, j: usize) -> Option<TileHint> {
        if layer >= self.settings.r() {
            return None;
        }

        let target = self.target.get(i, j)?;
        let player = self.player_matrix().get(i, j)?;
        let covered = self.state.covers(layer, i, j);

        Some(if self.is_editing() {
            if covered { TileHint::Good } else { TileHint::Zero }
        } else {
            match self.settings.mode() {
                Mode::Or => match (target, covered) {
                    (true, true) => TileHint::Good,
                    (true, false) => if player { TileHint::Zero } else { TileHint::Want },
                    (false, true) => TileHint::Bad,
                    (false, false) => TileHint::Zero,
                },
                Mode::Xor => match (target ^ player ^ covered, covered) {
                    (true, true) => TileHint::Good,
                    (true, false) => TileHint::Want,
                    (false, true) => TileHint::Bad,
                    (false, false) => TileHint::Zero,
                },
            }
        })
    }

    /// The puzzle code of this instance. In the editor, the code describes the player's composed matrix instead.
    pub fn encode(&self) -> String {
        match self.is_editing() {
            true => codec::encode(&self.settings, &self.player_matrix()),
            false => codec::encode(&self.settings, &self.target),
        }
    }

    /// Replace this instance with the one described by `code`.
    ///
    /// On failure nothing changes. Loading leaves the editor, discarding the instance saved on entering it.
    pub fn load_code(&mut self, code: &str) -> Result<(), BmfError> {
        let (settings, target) = codec::decode(code)?;
        self.editor = None;
        self.replace(settings, target);
        Ok(())
    }

    /// Enter the editor: the current instance is set aside and the toggles are cleared.
    pub fn enter_editor(&mut self) {
        if self.is_editing() {
            return;
        }

        self.editor = Some(EditorBackup {
            settings: self.settings,
            target: self.target.clone(),
            state: self.state.clone(),
            solved: self.solved,
            was_solved: self.was_solved,
        });
        self.state.clear();
    }

    /// Leave the editor, restoring the instance set aside by [`Self::enter_editor`].
    pub fn exit_editor(&mut self) {
        if let Some(backup) = self.editor.take() {
            self.settings = backup.settings;
            self.target = backup.target;
            self.state = backup.state;
            self.solved = backup.solved;
            self.was_solved = backup.was_solved;
        }
    }

    /// Copy the persistent parts of this session.
    pub fn snapshot(&self) -> BmfSnapshot {
        BmfSnapshot {
            settings: self.settings,
            target: self.target.to_rows(),
            u: self.state.rows_u(),
            v: self.state.rows_v(),
            cur: self.state.cur(),
            was_solved: self.was_solved,
        }
    }

    /// Rebuild a session from a snapshot, checking every shape against its settings.
    pub fn restore(snapshot: BmfSnapshot) -> Result<Self, BmfError> {
        let result = Self::restore_inner(snapshot);
        if let Err(e) = &result {
            warn!("rejected snapshot: {e}");
        }
        result
    }

    fn restore_inner(snapshot: BmfSnapshot) -> Result<Self, BmfError> {
        let settings = BmfSettings::new(snapshot.settings.n(), snapshot.settings.r(), snapshot.settings.mode())?;

        let target = BitMatrix::from_rows(&snapshot.target.iter()
            .map(|row| row.iter().map(|bit| u8::from(*bit)).collect::<Vec<_>>())
            .collect::<Vec<_>>())
            .filter(|target| target.side() == settings.n())
            .ok_or(BmfError::SnapshotShape)?;

        let state = PlayerState::from_layers(snapshot.u, snapshot.v, snapshot.cur)
            .filter(|state| state.layers() == settings.r() && state.side() == settings.n())
            .ok_or(BmfError::SnapshotShape)?;

        let solved = state.compose(settings.mode()) == target;

        Ok(Self {
            settings,
            target,
            state,
            solved,
            was_solved: snapshot.was_solved || solved,
            editor: None,
        })
    }
}
