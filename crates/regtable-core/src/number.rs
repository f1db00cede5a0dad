/// Parse an unsigned number with C-style radix prefixes
///
/// `0x`/`0X` selects hex, a leading `0` followed by more digits selects
/// octal, anything else is decimal. Surrounding whitespace is ignored.
/// Signs are rejected, the digits must follow the prefix directly.
pub fn parse_number(s: &str) -> Option<u32> {
    let s = s.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if !digits.starts_with(|c: char| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
