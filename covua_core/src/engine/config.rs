use crate::logic::eval_constants::{
    VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK, WIN_SCORE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,

    // Search Parameters
    /// Nominal lookahead in plies.
    pub search_depth: u8,
    /// How far past the horizon the capture-only extension may run.
    /// 0 disables the extension.
    pub quiescence_depth: u8,
    /// Root results below -win_score mean the side to move is lost.
    /// Must stay strictly smaller than val_king.
    pub win_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,

            search_depth: 4,
            quiescence_depth: 4,
            win_score: WIN_SCORE,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,

    search_depth: Option<u8>,
    quiescence_depth: Option<u8>,
}

impl EngineConfig {
    /// Loads a tuning file where piece values are scale factors applied to
    /// the defaults and search parameters are absolute.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: default.val_king,

            search_depth: json_config.search_depth.unwrap_or(default.search_depth),
            quiescence_depth: json_config
                .quiescence_depth
                .unwrap_or(default.quiescence_depth),
            win_score: default.win_score,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
