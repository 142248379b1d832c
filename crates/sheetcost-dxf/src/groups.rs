use crate::{DxfError, Result};

/// One group code / value pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Group<'a> {
    pub code: i32,
    pub value: &'a str,
}

impl Group<'_> {
    pub fn is(&self, code: i32, value: &str) -> bool {
        self.code == code && self.value == value
    }
}

pub(crate) fn parse_groups(input: &str) -> Result<Vec<Group<'_>>> {
    let mut lines: Vec<&str> = input.lines().collect();

    // Writers often leave a blank line after EOF
    while !lines.len().is_multiple_of(2) && lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if !lines.len().is_multiple_of(2) {
        return Err(DxfError::OddLineCount);
    }

    lines
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let raw = pair[0].trim();
            let code = raw.parse().map_err(|_| DxfError::InvalidGroupCode {
                raw: raw.to_string(),
                line: i * 2 + 1,
            })?;
            Ok(Group {
                code,
                value: pair[1].trim(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_lines() {
        let groups = parse_groups("  0\nSECTION\n  2\nENTITIES\r\n").unwrap();
        assert_eq!(
            groups,
            vec![
                Group {
                    code: 0,
                    value: "SECTION"
                },
                Group {
                    code: 2,
                    value: "ENTITIES"
                },
            ]
        );
    }

    #[test]
    fn trailing_blank_line_is_ignored() {
        assert_eq!(parse_groups("0\nEOF\n\n").unwrap().len(), 1);
    }

    #[test]
    fn odd_line_count() {
        assert!(matches!(
            parse_groups("0\nSECTION\n2"),
            Err(DxfError::OddLineCount)
        ));
    }

    #[test]
    fn bad_group_code_reports_line() {
        match parse_groups("0\nSECTION\nxx\nENTITIES\n") {
            Err(DxfError::InvalidGroupCode { raw, line }) => {
                assert_eq!(raw, "xx");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
