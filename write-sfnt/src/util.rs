//! Misc utility functions

/// Search range values used in various tables.
///
/// Several binary formats carry precomputed binary-search acceleration
/// fields; they are always derived the same way from an item count and an
/// item size.
#[derive(Clone, Copy, Debug)]
pub struct SearchRange {
    /// `item_size * 2^entry_selector`
    pub search_range: u16,
    /// `floor(log2(n_items))`
    pub entry_selector: u16,
    /// `n_items * item_size - search_range`
    pub range_shift: u16,
}

impl SearchRange {
    /// Calculate `search_range`, `entry_selector` and `range_shift`.
    ///
    /// These values are used in the [table directory] and in [cmap
    /// format 4].
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    /// [cmap format 4]: https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
    pub fn compute(n_items: usize, item_size: usize) -> Self {
        let entry_selector = (n_items as f64).log2().floor() as usize;
        let search_range = (2.0_f64.powi(entry_selector as i32) * item_size as f64) as usize;
        // the result doesn't really make sense with 0 items but at least
        // don't fail
        let range_shift = (n_items * item_size).saturating_sub(search_range);
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// based on the example in the cmap format 4 specification
    #[test]
    fn cmap_spec_example() {
        let SearchRange {
            search_range,
            entry_selector,
            range_shift,
        } = SearchRange::compute(39, 2);
        assert_eq!((search_range, entry_selector, range_shift), (64, 5, 14));
    }

    #[test]
    fn zero_items_dont_crash() {
        let computed = SearchRange::compute(0, 0);
        assert_eq!(
            (
                computed.search_range,
                computed.entry_selector,
                computed.range_shift
            ),
            (0, 0, 0)
        );
    }
}
