//! Encoding for characters that would break the host's `key=value;...`
//! parameter syntax or its line-oriented DSInfo block.

const ESCAPES: [(char, &str); 4] = [
    ('\n', "%0A"),
    ('\r', "%0D"),
    ('"', "%22"),
    (';', "%3B"),
];

pub fn char_escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ESCAPES.iter().find(|(raw, _)| *raw == ch) {
            Some((_, encoded)) => output.push_str(encoded),
            None => output.push(ch),
        }
    }
    output
}

/// Inverse of [`char_escape`]. Percent sequences other than the reserved
/// ones are left untouched, so `%` itself is never encoded and text that
/// already holds a reserved sequence such as `%3B` decodes to the raw
/// character.
pub fn char_unescape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        output.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate.get(..3).and_then(|code| {
            ESCAPES
                .iter()
                .find(|(_, encoded)| *encoded == code)
                .map(|(raw, _)| *raw)
        });
        match decoded {
            Some(raw) => {
                output.push(raw);
                rest = &candidate[3..];
            }
            None => {
                output.push('%');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_escape_encodes_reserved_characters() {
        assert_eq!(
            char_escape("a;b\r\n\"c\""),
            "a%3Bb%0D%0A%22c%22".to_string()
        );
        assert_eq!(char_escape("plain text"), "plain text");
    }

    #[test]
    fn char_escape_keeps_percent_signs() {
        assert_eq!(char_escape("50%"), "50%");
        assert_eq!(char_escape("a%25b"), "a%25b");
    }

    #[test]
    fn char_unescape_keeps_stored_percent_sequences() {
        assert_eq!(char_unescape("a%25b"), "a%25b");
        assert_eq!(char_unescape("q=%2Fdocs%3Bv=1"), "q=%2Fdocs;v=1");
    }

    #[test]
    fn char_unescape_decodes_reserved_sequences() {
        assert_eq!(char_unescape("Accept:*/*%3BX-Id:1"), "Accept:*/*;X-Id:1");
        assert_eq!(char_unescape("line%0D%0Anext"), "line\r\nnext");
        assert_eq!(char_unescape("%22quoted%22"), "\"quoted\"");
    }

    #[test]
    fn char_unescape_leaves_unknown_sequences() {
        assert_eq!(char_unescape("a%20b"), "a%20b");
        assert_eq!(char_unescape("100%"), "100%");
        assert_eq!(char_unescape("%0"), "%0");
        assert_eq!(char_unescape("%é"), "%é");
    }

    #[test]
    fn round_trip_is_identity() {
        let samples = [
            "",
            ";",
            "%",
            "50% off;\r\n",
            "%%\n%",
            "{\"name\":\"value; other\"}\r\n",
            "Content-Type:application/json;Accept:*/*",
            "ünïcødé;\n€",
        ];
        for sample in samples {
            assert_eq!(char_unescape(&char_escape(sample)), sample, "{sample:?}");
        }
    }
}
