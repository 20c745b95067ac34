// Rank model: maps a player's Elo rating to a category band, a
// progress-within-band percentage, and the presentation tokens used by
// the views. Pure lookups and arithmetic, no I/O.

use serde::{Deserialize, Serialize};

/// Ranking categories, ordered by Elo band.
///
/// Wire names are the backend's Portuguese enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Categoria {
    Bronze,
    Prata,
    Ouro,
    Diamante,
    Mestre,
}

/// The Elo range covered by a category. `max` is `None` for the open-ended
/// top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankBand {
    pub min: i32,
    pub max: Option<i32>,
}

impl Categoria {
    pub const ALL: [Categoria; 5] = [
        Categoria::Bronze,
        Categoria::Prata,
        Categoria::Ouro,
        Categoria::Diamante,
        Categoria::Mestre,
    ];

    /// The Elo band for this category. Bands are contiguous and
    /// non-overlapping; MESTRE has no upper bound.
    pub fn band(self) -> RankBand {
        match self {
            Categoria::Bronze => RankBand { min: 0, max: Some(999) },
            Categoria::Prata => RankBand { min: 1000, max: Some(1499) },
            Categoria::Ouro => RankBand { min: 1500, max: Some(1999) },
            Categoria::Diamante => RankBand { min: 2000, max: Some(2499) },
            Categoria::Mestre => RankBand { min: 2500, max: None },
        }
    }

    /// Derive the category a rating falls in. This is the authoritative
    /// mapping used by the views; the backend-supplied `categoria` field can
    /// lag behind a rating change.
    pub fn from_elo(elo: i32) -> Categoria {
        match elo {
            i32::MIN..=999 => Categoria::Bronze,
            1000..=1499 => Categoria::Prata,
            1500..=1999 => Categoria::Ouro,
            2000..=2499 => Categoria::Diamante,
            _ => Categoria::Mestre,
        }
    }

    /// Display name as shown to players (the wire value).
    pub fn display_name(self) -> &'static str {
        match self {
            Categoria::Bronze => "BRONZE",
            Categoria::Prata => "PRATA",
            Categoria::Ouro => "OURO",
            Categoria::Diamante => "DIAMANTE",
            Categoria::Mestre => "MESTRE",
        }
    }
}

impl std::fmt::Display for Categoria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Progress toward the next category, as a percentage in [0, 100].
///
/// The open-ended top band always reports 100 (there is no next rank).
/// Ratings outside the nominal band are clamped rather than rejected, so a
/// stale rating/category pair degrades to a saturated bar instead of an
/// error in the middle of a listing.
pub fn progress(elo: i32, categoria: Categoria) -> f64 {
    let band = categoria.band();
    let Some(max) = band.max else {
        return 100.0;
    };
    let pct = (elo - band.min) as f64 / (max - band.min) as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Presentation color token for a category.
pub fn color_token(categoria: Categoria) -> &'static str {
    match categoria {
        Categoria::Bronze => "rank-bronze",
        Categoria::Prata => "rank-silver",
        Categoria::Ouro => "rank-gold",
        Categoria::Diamante => "rank-diamond",
        Categoria::Mestre => "rank-master",
    }
}

/// Presentation glow token for a category.
pub fn glow_token(categoria: Categoria) -> &'static str {
    match categoria {
        Categoria::Bronze => "glow-bronze",
        Categoria::Prata => "glow-silver",
        Categoria::Ouro => "glow-gold",
        Categoria::Diamante => "neon-cyan",
        Categoria::Mestre => "neon-purple",
    }
}
