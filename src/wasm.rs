//! JavaScript bindings.
//!
//! Mutating methods return `true` when the call solved the puzzle, and throw the error message otherwise.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::bmf::{BmfSession, BmfSettings, Mode, Selector, TileHint};
use crate::masyu::{generate, Circle, Geometry, MasyuSession, MasyuSettings, Segment};
use crate::{Location, SolveTransition};

/// Route `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
}

fn browser_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

fn just_solved(transition: SolveTransition) -> bool {
    matches!(transition, SolveTransition::Solved { .. })
}

fn to_js<E: ToString>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn hint_code(hint: Option<TileHint>) -> u8 {
    match hint {
        Some(TileHint::Zero) => 0,
        Some(TileHint::Good) => 1,
        Some(TileHint::Bad) => 2,
        Some(TileHint::Want) => 3,
        None => u8::MAX,
    }
}

/// A BMF game.
#[wasm_bindgen]
pub struct BmfGame {
    session: BmfSession,
    rng: ChaCha8Rng,
}

#[wasm_bindgen]
impl BmfGame {
    /// Out-of-range sizes are clamped.
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize, r: usize, xor: bool) -> BmfGame {
        let mut rng = browser_rng();
        let mode = if xor { Mode::Xor } else { Mode::Or };
        let session = BmfSession::new(BmfSettings::clamped(n, r, mode), &mut rng);
        BmfGame { session, rng }
    }

    /// Board side.
    pub fn n(&self) -> usize {
        self.session.settings().n()
    }

    /// Number of layers.
    pub fn r(&self) -> usize {
        self.session.settings().r()
    }

    /// Whether layers combine by XOR rather than OR.
    pub fn xor(&self) -> bool {
        self.session.settings().mode() == Mode::Xor
    }

    /// The selected layer.
    pub fn current_layer(&self) -> usize {
        self.session.current_layer()
    }

    /// Flip row selector `index` of the selected layer.
    pub fn toggle_row(&mut self, index: usize) -> Result<bool, JsValue> {
        self.session.toggle(Selector::Row, index).map(just_solved).map_err(to_js)
    }

    /// Flip column selector `index` of the selected layer.
    pub fn toggle_col(&mut self, index: usize) -> Result<bool, JsValue> {
        self.session.toggle(Selector::Column, index).map(just_solved).map_err(to_js)
    }

    /// Make `layer` the selected layer.
    pub fn select_layer(&mut self, layer: usize) -> Result<bool, JsValue> {
        self.session.select_layer(layer).map(just_solved).map_err(to_js)
    }

    /// Unset every selector of every layer.
    pub fn clear(&mut self) -> bool {
        just_solved(self.session.clear())
    }

    /// A new target with the same settings.
    pub fn regenerate(&mut self) {
        self.session.regenerate(&mut self.rng);
    }

    /// Change the settings, clamping `n` and `r`. Starts a new instance when anything changed.
    pub fn resize(&mut self, n: usize, r: usize, xor: bool) {
        let mode = if xor { Mode::Xor } else { Mode::Or };
        self.session.set_settings(BmfSettings::clamped(n, r, mode), &mut self.rng);
    }

    /// The shareable puzzle code.
    pub fn code(&self) -> String {
        self.session.encode()
    }

    /// Replace the instance with the one `code` describes.
    pub fn load(&mut self, code: &str) -> Result<(), JsValue> {
        self.session.load_code(code).map_err(to_js)
    }

    /// Open the editor, setting the current instance aside.
    pub fn enter_editor(&mut self) {
        self.session.enter_editor();
    }

    /// Close the editor, restoring the instance set aside.
    pub fn exit_editor(&mut self) {
        self.session.exit_editor();
    }

    /// Whether the editor is open.
    pub fn editing(&self) -> bool {
        self.session.is_editing()
    }

    /// Target bit `(i, j)`; `false` off the board.
    pub fn target_bit(&self, i: usize, j: usize) -> bool {
        self.session.target().get(i, j).unwrap_or(false)
    }

    /// Bit `(i, j)` of the player's composition; `false` off the board.
    pub fn player_bit(&self, i: usize, j: usize) -> bool {
        self.session.player_matrix().get(i, j).unwrap_or(false)
    }

    /// Row selector bit `index` of `layer`.
    pub fn row_bit(&self, layer: usize, index: usize) -> bool {
        self.session.state().row_selector(layer).and_then(|row| row.get(index).copied()).unwrap_or(false)
    }

    /// Column selector bit `index` of `layer`.
    pub fn col_bit(&self, layer: usize, index: usize) -> bool {
        self.session.state().column_selector(layer).and_then(|col| col.get(index).copied()).unwrap_or(false)
    }

    /// 0 for nothing, 1 good, 2 bad, 3 wanted; 255 off the board.
    pub fn hint(&self, i: usize, j: usize) -> u8 {
        hint_code(self.session.hint(i, j))
    }

    /// [`BmfGame::hint`] as seen from `layer`; 255 also for a missing layer.
    pub fn hint_for_layer(&self, layer: usize, i: usize, j: usize) -> u8 {
        hint_code(self.session.hint_for_layer(layer, i, j))
    }

    /// Whether the composition equals the target.
    pub fn solved(&self) -> bool {
        self.session.is_solved()
    }

    /// Whether this instance has ever been solved.
    pub fn was_solved(&self) -> bool {
        self.session.was_solved()
    }
}

/// A Masyu game.
#[wasm_bindgen]
pub struct MasyuGame {
    session: MasyuSession,
    geometry: Geometry,
    rng: ChaCha8Rng,
}

#[wasm_bindgen]
impl MasyuGame {
    /// Generate a board of side `n`. Throws when `n` is unsupported or no unique board was found.
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize) -> Result<MasyuGame, JsValue> {
        let mut rng = browser_rng();
        let clues = generate(&MasyuSettings::new(n).map_err(to_js)?, &mut rng).map_err(to_js)?;
        Ok(MasyuGame {
            session: MasyuSession::new(clues),
            geometry: Geometry::default(),
            rng,
        })
    }

    /// Board side.
    pub fn n(&self) -> usize {
        self.session.clues().side()
    }

    /// Pixel layout used by [`MasyuGame::toggle_at`].
    pub fn set_geometry(&mut self, cell_size: f64, margin: f64) {
        self.geometry = Geometry { cell_size, margin };
    }

    /// A new board of the same side.
    pub fn regenerate(&mut self) -> Result<(), JsValue> {
        let settings = MasyuSettings::new(self.n()).map_err(to_js)?;
        let clues = generate(&settings, &mut self.rng).map_err(to_js)?;
        self.session = MasyuSession::new(clues);
        Ok(())
    }

    /// Toggle the segment under a click; `false` also when the click hit nothing.
    pub fn toggle_at(&mut self, x: f64, y: f64) -> bool {
        self.session.toggle_at(x, y, &self.geometry).is_some_and(just_solved)
    }

    /// Flip the segment from point `(x, y)` to `(x + 1, y)`.
    pub fn toggle_horizontal(&mut self, x: usize, y: usize) -> Result<bool, JsValue> {
        self.session.toggle(Segment::Horizontal(Location(x, y))).map(just_solved).map_err(to_js)
    }

    /// Flip the segment from point `(x, y)` to `(x, y + 1)`.
    pub fn toggle_vertical(&mut self, x: usize, y: usize) -> Result<bool, JsValue> {
        self.session.toggle(Segment::Vertical(Location(x, y))).map(just_solved).map_err(to_js)
    }

    /// Whether the segment from point `(x, y)` to `(x + 1, y)` is drawn.
    pub fn horizontal(&self, x: usize, y: usize) -> bool {
        self.session.edges().contains(Segment::Horizontal(Location(x, y)))
    }

    /// Whether the segment from point `(x, y)` to `(x, y + 1)` is drawn.
    pub fn vertical(&self, x: usize, y: usize) -> bool {
        self.session.edges().contains(Segment::Vertical(Location(x, y)))
    }

    /// 0 for no circle, 1 black, 2 white.
    pub fn circle(&self, x: usize, y: usize) -> u8 {
        match self.session.clues().get(Location(x, y)) {
            None => 0,
            Some(Circle::Black) => 1,
            Some(Circle::White) => 2,
        }
    }

    /// Erase the drawing.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Whether the drawing solves the board.
    pub fn solved(&self) -> bool {
        self.session.is_solved()
    }

    /// Whether this board has ever been solved.
    pub fn was_solved(&self) -> bool {
        self.session.was_solved()
    }

    /// Why the current drawing is not a solution, or an empty string.
    pub fn problem(&self) -> String {
        self.session.validate().err().map(|violation| violation.to_string()).unwrap_or_default()
    }
}
