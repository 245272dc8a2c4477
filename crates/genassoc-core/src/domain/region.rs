//! Chromosome and region bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Violation;

const AUTOSOMES: u8 = 22;

/// A validated chromosome token.
///
/// Only the human autosomes `1`..`22` and `X`, `Y`, `MT` are accepted. A
/// validated chromosome is safe to interpolate into table names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome(String);

impl Chromosome {
    /// Validate a raw chromosome token.
    ///
    /// Matching is case-insensitive and tolerates a `chr` prefix; `M` is an
    /// alias of `MT`.
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        let upper = raw.trim().to_uppercase();
        let token = upper.strip_prefix("CHR").unwrap_or(&upper);

        let canonical = match token {
            "X" | "Y" | "MT" => token.to_string(),
            "M" => "MT".to_string(),
            numeric => match numeric.parse::<u8>() {
                Ok(n) if (1..=AUTOSOMES).contains(&n) && !numeric.starts_with('0') => {
                    n.to_string()
                }
                _ => {
                    return Err(Violation::InvalidChromosome {
                        input: raw.to_string(),
                    });
                }
            },
        };

        Ok(Self(canonical))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive coordinate bounds on one chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start: u64,
    pub end: u64,
}

impl Region {
    /// Validate raw region bounds.
    ///
    /// Fails when either bound is negative, when `start > end`, or when the
    /// span `end - start` exceeds `max_window`.
    pub fn parse(start: i64, end: i64, max_window: u64) -> Result<Self, Violation> {
        let invalid = || Violation::InvalidRegion { start, end };

        let (Ok(start_bp), Ok(end_bp)) = (u64::try_from(start), u64::try_from(end)) else {
            return Err(invalid());
        };
        if start_bp > end_bp || end_bp - start_bp > max_window {
            return Err(invalid());
        }

        Ok(Self {
            start: start_bp,
            end: end_bp,
        })
    }

    #[must_use]
    pub const fn span(&self) -> u64 {
        self.end - self.start
    }
}
