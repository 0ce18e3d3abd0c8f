pub const TRUE_PREFIX: &str = "LABEL_TRUE_";
pub const END_PREFIX: &str = "LABEL_END_";
pub const RETURN_PREFIX: &str = "RETURN_LABEL_";

/// Returns true if `symbol` falls in the namespace of generated labels.
pub fn is_generated(symbol: &str) -> bool {
    [TRUE_PREFIX, END_PREFIX, RETURN_PREFIX]
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}

/// Hands out the numbers that make branch and return labels unique.
///
/// One allocator lives as long as one translation run, so the numbering
/// continues across input units.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }

    /// How many numbers have been handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_zero() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.issued(), 0);
        assert_eq!(labels.next(), 0);
        assert_eq!(labels.next(), 1);
        assert_eq!(labels.next(), 2);
        assert_eq!(labels.issued(), 3);
    }

    #[test]
    fn test_generated_namespace() {
        assert!(is_generated("LABEL_TRUE_0"));
        assert!(is_generated("LABEL_END_12"));
        assert!(is_generated("RETURN_LABEL_3"));
        assert!(!is_generated("LOOP"));
        assert!(!is_generated("Main.f$LABEL_TRUE_0"));
    }
}
