//! Tests for canonical mesh index tables

#[cfg(test)]
mod tests {
    use kinmorph::analysis::landmarks::{
        LEFT_CHEEK_QUAD, MORPH_INDICES, REQUIRED_LANDMARKS, RIGHT_CHEEK, RIGHT_CHEEK_QUAD,
    };
    use std::collections::HashSet;

    // Tests the morph subset has no repeated indices
    // Verified by duplicating the chin index
    #[test]
    fn test_morph_indices_unique() {
        let unique: HashSet<_> = MORPH_INDICES.iter().collect();
        assert_eq!(unique.len(), MORPH_INDICES.len());
        assert_eq!(MORPH_INDICES.len(), 76);
    }

    // Tests every consumed index fits in the required mesh length
    // Verified by lowering the required length below the cheek index
    #[test]
    fn test_indices_within_required_length() {
        assert_eq!(REQUIRED_LANDMARKS, RIGHT_CHEEK + 1);
        assert_eq!(REQUIRED_LANDMARKS, 455);
        let all = MORPH_INDICES
            .iter()
            .chain(&LEFT_CHEEK_QUAD)
            .chain(&RIGHT_CHEEK_QUAD);
        for &index in all {
            assert!(index < REQUIRED_LANDMARKS, "index {index} out of range");
        }
    }

    // Tests the morph subset starts with the face oval at the forehead
    // Verified by reordering the groups
    #[test]
    fn test_morph_order_starts_at_forehead() {
        assert_eq!(MORPH_INDICES[0], 10);
        assert!(MORPH_INDICES[..36].contains(&152));
    }
}
