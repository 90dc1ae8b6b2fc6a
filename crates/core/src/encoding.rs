/// Percent-encodes a URL component, leaving the same unreserved set browsers
/// leave alone for `encodeURIComponent`.
pub fn pct_encode_component(input: &str) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
            )
        {
            output.push(byte as char);
        } else {
            output.push('%');
            output.push_str(&format!("{:02X}", byte));
        }
    }
    output
}

pub fn data_url(mime_type: &str, body: &str) -> String {
    format!(
        "data:{};charset=utf-8,{}",
        mime_type,
        pct_encode_component(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unreserved_marks() {
        assert_eq!(pct_encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn encodes_reserved_and_utf8() {
        assert_eq!(pct_encode_component("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(pct_encode_component("Pelé"), "Pel%C3%A9");
    }

    #[test]
    fn data_url_carries_mime_and_charset() {
        assert_eq!(data_url("text/plain", "1 + 2"), "data:text/plain;charset=utf-8,1%20%2B%202");
    }
}
