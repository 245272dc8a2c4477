//! Variant and position value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Violation;

/// A chromosome + coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Chromosome token (`1`..`22`, `X`, `Y`, `MT`, ...). Only presence is checked.
    pub chromosome: String,
    /// Base-pair coordinate.
    pub coordinate: u64,
}

impl Position {
    #[must_use]
    pub fn new(chromosome: impl Into<String>, coordinate: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            coordinate,
        }
    }
}

/// A genomic change at a position.
///
/// The identity of a variant is `CHR_POS_REF_ALT` and depends only on the
/// four positional fields; annotations such as `rs_id` or the nearest genes
/// do not take part in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub position: Position,
    pub ref_allele: String,
    pub alt_allele: String,
    pub rs_id: Option<String>,
    pub nearest_gene_id: Option<String>,
    pub nearest_coding_gene_id: Option<String>,
}

impl Variant {
    /// Build a bare variant with no annotations.
    #[must_use]
    pub fn new(
        position: Position,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        Self {
            position,
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
            rs_id: None,
            nearest_gene_id: None,
            nearest_coding_gene_id: None,
        }
    }

    /// Parse a raw `chr_pos_ref_alt` identifier.
    ///
    /// The input is uppercased before splitting, so `1_100_a_g` and
    /// `1_100_A_G` produce the same variant. Exactly four non-empty tokens
    /// are required and the position must be a non-negative integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use genassoc_core::domain::Variant;
    ///
    /// let variant = Variant::parse("1_12345_a_g").unwrap();
    /// assert_eq!(variant.id(), "1_12345_A_G");
    /// assert!(Variant::parse("1_12345_A").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        let invalid = || Violation::InvalidVariant {
            input: raw.to_string(),
        };

        let upper = raw.to_uppercase();
        let tokens: Vec<&str> = upper.split('_').collect();
        let [chromosome, coordinate, ref_allele, alt_allele] = tokens.as_slice() else {
            return Err(invalid());
        };
        if tokens.iter().any(|token| token.is_empty()) {
            return Err(invalid());
        }

        if !coordinate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let coordinate = coordinate.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self::new(
            Position::new(*chromosome, coordinate),
            *ref_allele,
            *alt_allele,
        ))
    }

    /// Attach an rsId annotation.
    #[must_use]
    pub fn with_rs_id(mut self, rs_id: Option<String>) -> Self {
        self.rs_id = rs_id;
        self
    }

    /// Canonical `CHR_POS_REF_ALT` identifier.
    #[must_use]
    pub fn id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.position.chromosome.to_uppercase(),
            self.position.coordinate,
            self.ref_allele,
            self.alt_allele
        )
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_variant() {
        let variant = Variant::parse("1_12345_A_G").unwrap();
        assert_eq!(variant.position, Position::new("1", 12345));
        assert_eq!(variant.ref_allele, "A");
        assert_eq!(variant.alt_allele, "G");
        assert!(variant.rs_id.is_none());
        assert_eq!(variant.id(), "1_12345_A_G");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower = Variant::parse("x_500_ac_t").unwrap();
        let upper = Variant::parse("X_500_AC_T").unwrap();
        assert_eq!(lower.id(), upper.id());
        assert_eq!(lower.id(), "X_500_AC_T");
    }

    #[test]
    fn test_parse_rejects_wrong_token_count() {
        for raw in ["", "1_100_A", "1_100_A_G_T", "1-100-A-G"] {
            assert!(
                matches!(Variant::parse(raw), Err(Violation::InvalidVariant { .. })),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_tokens() {
        assert!(Variant::parse("1__A_G").is_err());
        assert!(Variant::parse("_100_A_G").is_err());
        assert!(Variant::parse("1_100_A_").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_or_negative_position() {
        assert!(Variant::parse("1_abc_A_G").is_err());
        assert!(Variant::parse("1_-5_A_G").is_err());
        assert!(Variant::parse("1_1.5_A_G").is_err());
    }

    #[test]
    fn test_parse_rejects_signed_or_padded_position() {
        for raw in ["1_+5_A_G", "1_ 5_A_G", "1_5 _A_G"] {
            assert!(
                matches!(Variant::parse(raw), Err(Violation::InvalidVariant { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_violation_keeps_raw_input() {
        let err = Variant::parse("bad_input").unwrap_err();
        assert_eq!(err.input(), "bad_input");
    }

    #[test]
    fn test_identity_ignores_annotations() {
        let plain = Variant::parse("2_10_C_T").unwrap();
        let annotated = plain.clone().with_rs_id(Some("rs123".to_string()));
        assert_eq!(plain.id(), annotated.id());
        assert_eq!(annotated.to_string(), "2_10_C_T");
    }
}
