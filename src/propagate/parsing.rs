use super::error::ElementSetError;

/// Splits element-set text into an optional name line and the two element lines.
pub fn parse_tle_lines(tle: &str) -> Result<(Option<String>, String, String), ElementSetError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.as_slice() {
        [line1, line2] if is_element_pair(line1, line2) => Ok((None, line1.clone(), line2.clone())),
        [name, line1, line2] if is_element_pair(line1, line2) => {
            Ok((Some(name.clone()), line1.clone(), line2.clone()))
        }
        _ => Err(ElementSetError::InvalidTleFormat),
    }
}

/// Splits a file of concatenated element sets, skipping lines that belong to none.
pub fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if i + 1 < lines.len() && is_element_pair(lines[i], lines[i + 1]) {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len() && is_element_pair(lines[i + 1], lines[i + 2]) {
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

fn is_element_pair(line1: &str, line2: &str) -> bool {
    line1.starts_with("1 ") && line2.starts_with("2 ")
}
