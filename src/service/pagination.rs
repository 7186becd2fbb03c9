//! Effective limit/offset for slicing a fully decoded result.

pub const DEFAULT_LIMIT: usize = 5;

/// Resolve raw `limit`/`offset` query values against `total` rows.
///
/// Missing or unparseable values fall back to a limit of 5 and an offset of 0.
/// The result always satisfies `limit <= total` and `offset + limit <= total`.
pub fn resolve(raw_limit: Option<&str>, raw_offset: Option<&str>, total: usize) -> (usize, usize) {
    let limit = raw_limit
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .min(total);
    let offset = raw_offset
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(0)
        .min(total - limit);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(resolve(None, None, 20), (5, 0));
        assert_eq!(resolve(Some("abc"), Some("x"), 20), (5, 0));
        assert_eq!(resolve(Some("-3"), Some("-1"), 20), (5, 0));
    }

    #[test]
    fn limit_clamped_to_total() {
        assert_eq!(resolve(Some("100"), Some("0"), 3), (3, 0));
    }

    #[test]
    fn offset_pulled_back_into_range() {
        assert_eq!(resolve(Some("5"), Some("18"), 20), (5, 15));
        assert_eq!(resolve(Some("2"), Some("1"), 20), (2, 1));
    }

    #[test]
    fn empty_table() {
        assert_eq!(resolve(None, Some("7"), 0), (0, 0));
        assert_eq!(resolve(Some("10"), None, 0), (0, 0));
    }

    #[test]
    fn bounds_hold_everywhere() {
        let raws = [None, Some("0"), Some("1"), Some("4"), Some("9"), Some("50"), Some("nan")];
        for total in 0..12 {
            for l in raws {
                for o in raws {
                    let (limit, offset) = resolve(l, o, total);
                    assert!(limit <= total);
                    assert!(offset + limit <= total);
                }
            }
        }
    }
}
