// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module splices marker patterns into base lines.

use rand::Rng;
use rand::RngExt;

use crate::{Error, Result};

/// Overwrite a random span of `line` with `pattern`, keeping the line length.
///
/// The offset is uniform over every position where the pattern fits. Lines
/// are ASCII by construction, the splice operates on byte offsets.
pub fn inject(rng: &mut impl Rng, line: &str, pattern: &str) -> Result<String> {
    if pattern.len() > line.len() {
        return Err(Error::PatternTooLong(pattern.to_string(), line.len()));
    }
    let pos = rng.random_range(0..=line.len() - pattern.len());
    Ok(format!(
        "{}{}{}",
        &line[..pos],
        pattern,
        &line[pos + pattern.len()..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_inject() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let line = "0123456789".repeat(8);
        for _ in 0..32 {
            let result = inject(&mut rng, &line, "A_MARKER").unwrap();
            assert_eq!(result.len(), line.len());
            assert_eq!(result.matches("A_MARKER").count(), 1);
        }
    }

    #[test]
    fn test_inject_exact_fit() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // The only valid offset is zero
        assert_eq!(inject(&mut rng, "abcd", "WXYZ").unwrap(), "WXYZ");
    }

    #[test]
    fn test_inject_too_long() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        match inject(&mut rng, "abc", "TOO_LONG") {
            Err(Error::PatternTooLong(pattern, len)) => {
                assert_eq!(pattern, "TOO_LONG");
                assert_eq!(len, 3);
            }
            other => panic!("expected pattern error, got {:?}", other),
        }
    }
}
