/// Returns the number of leading bytes `a` and `b` have in common.
pub fn longest_prefix(a: &[u8], b: &[u8]) -> usize {
    let max = a.len().min(b.len());
    let mut i = 0;

    while i < max && a[i] == b[i] {
        i += 1;
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix() {
        assert_eq!(longest_prefix(b"romane", b"romanus"), 5);
        assert_eq!(longest_prefix(b"rub", b"rubicon"), 3);
        assert_eq!(longest_prefix(b"rubicon", b"rub"), 3);
        assert_eq!(longest_prefix(b"abc", b"xyz"), 0);
    }

    #[test]
    fn test_longest_prefix_empty() {
        assert_eq!(longest_prefix(b"", b"abc"), 0);
        assert_eq!(longest_prefix(b"abc", b""), 0);
        assert_eq!(longest_prefix(b"", b""), 0);
    }

    #[test]
    fn test_longest_prefix_multibyte() {
        // Compared bytewise, so a split may fall inside a UTF-8 sequence
        let a = "é".as_bytes();
        let b = "è".as_bytes();
        assert_eq!(longest_prefix(a, b), 1);
    }
}
