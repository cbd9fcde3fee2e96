/// Abbreviate a token amount: `1.5M`, `2.5B`, `12.0K`, or the plain number below a thousand.
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000_000 {
        abbreviate(tokens, 1_000_000_000, 'B')
    } else if tokens >= 1_000_000 {
        abbreviate(tokens, 1_000_000, 'M')
    } else if tokens >= 1_000 {
        abbreviate(tokens, 1_000, 'K')
    } else {
        group_thousands(tokens)
    }
}

// One decimal place, halves rounded up.
fn abbreviate(tokens: u64, unit: u64, suffix: char) -> String {
    let tenths = (u128::from(tokens) * 10 + u128::from(unit / 2)) / u128::from(unit);
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

/// `1234567` becomes `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// `m:ss` for a minute or more, `Ns` below that.
pub fn format_time(milliseconds: u64) -> String {
    let seconds = milliseconds / 1000;
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;

    if minutes > 0 {
        format!("{minutes}:{remaining_seconds:02}")
    } else {
        format!("{remaining_seconds}s")
    }
}

/// Keep the `0x` prefix plus `chars` characters at each end of a wallet address.
pub fn shorten_address(address: &str, chars: usize) -> String {
    let count = address.chars().count();
    if count <= 2 * chars + 2 {
        return address.to_string();
    }

    let head: String = address.chars().take(chars + 2).collect();
    let tail: String = address.chars().skip(count - chars).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tokens_abbreviates_large_amounts() {
        assert_eq!(format_tokens(1_500_000), "1.5M");
        assert_eq!(format_tokens(2_500_000_000), "2.5B");
        assert_eq!(format_tokens(12_000), "12.0K");
        assert_eq!(format_tokens(1_000), "1.0K");
    }

    #[test]
    fn format_tokens_rounds_halves_up() {
        assert_eq!(format_tokens(1_250), "1.3K");
        assert_eq!(format_tokens(2_250), "2.3K");
        assert_eq!(format_tokens(1_250_000), "1.3M");
        assert_eq!(format_tokens(1_249), "1.2K");
        assert_eq!(format_tokens(999_999), "1000.0K");
        assert_eq!(format_tokens(u64::MAX), "18446744073.7B");
    }

    #[test]
    fn format_tokens_leaves_small_amounts_alone() {
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(0), "0");
    }

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn format_time_switches_to_minutes() {
        assert_eq!(format_time(0), "0s");
        assert_eq!(format_time(59_999), "59s");
        assert_eq!(format_time(60_000), "1:00");
        assert_eq!(format_time(125_500), "2:05");
    }

    #[test]
    fn shorten_address_keeps_prefix_and_suffix() {
        let address = "0x1234567890abcdef1234567890abcdef12345678";

        assert_eq!(shorten_address(address, 4), "0x1234...5678");
        assert_eq!(shorten_address("0xabc", 4), "0xabc");
    }
}
