//! Z-ordered accumulation of emitted fragments.

/// Fragments keyed by z-order.
///
/// Flattening yields ascending z-order; equal z-orders keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct ContentBucket {
    entries: Vec<(f64, String)>,
}

impl ContentBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>, zorder: f64) {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.entries.push((zorder, fragment));
        }
    }

    pub fn extend<I, S>(&mut self, fragments: I, zorder: f64)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for fragment in fragments {
            self.push(fragment, zorder);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flatten(mut self) -> Vec<String> {
        // sort_by is stable, which keeps traversal order within a layer
        self.entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.entries.into_iter().map(|(_, s)| s).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_orders_by_zorder_then_insertion() {
        let mut bucket = ContentBucket::new();
        bucket.push("line a", 2.0);
        bucket.push("patch", 1.0);
        bucket.push("line b", 2.0);
        bucket.extend(["text"], 3.0);
        bucket.push("image", -1.0);
        assert_eq!(
            bucket.flatten(),
            vec!["image", "patch", "line a", "line b", "text"]
        );
    }

    #[test]
    fn empty_fragments_are_dropped() {
        let mut bucket = ContentBucket::new();
        bucket.push("", 1.0);
        assert!(bucket.is_empty());
    }
}
