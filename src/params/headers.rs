use super::error::ParamsError;
use super::reader::PARAM_SEPARATOR;

/// Splits an unescaped `Name:value;Other:value` list into header pairs.
pub fn parse_header_list(raw: &str) -> Result<Vec<(String, String)>, ParamsError> {
    let mut headers = Vec::new();
    for entry in raw.split(PARAM_SEPARATOR) {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (name, value) = trimmed
            .split_once(':')
            .ok_or_else(|| ParamsError::InvalidHeader(trimmed.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParamsError::InvalidHeader(trimmed.to_string()));
        }
        headers.push((name.to_string(), value.trim().to_string()));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_header_list_splits_entries() {
        let headers =
            parse_header_list("Content-Type:application/json;Accept:*/*").expect("headers");
        assert_eq!(
            headers,
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "*/*".to_string()),
            ]
        );
    }

    #[test]
    fn parse_header_list_keeps_colons_in_values() {
        let headers = parse_header_list("Host: example.com:8080 ; ").expect("headers");
        assert_eq!(
            headers,
            vec![("Host".to_string(), "example.com:8080".to_string())]
        );
    }

    #[test]
    fn parse_header_list_accepts_empty_input() {
        assert!(parse_header_list("").expect("headers").is_empty());
        assert!(parse_header_list(" ; ;").expect("headers").is_empty());
    }

    #[test]
    fn parse_header_list_rejects_entries_without_colon() {
        let err = parse_header_list("Accept:*/*;broken").unwrap_err();
        assert_eq!(err, ParamsError::InvalidHeader("broken".to_string()));

        let err = parse_header_list(":value").unwrap_err();
        assert!(err.to_string().contains("expected name:value"));
    }
}
