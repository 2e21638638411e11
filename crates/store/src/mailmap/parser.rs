use authormap_common::error::{AuthormapError, AuthormapResult};

use super::models::{Mailmap, MailmapEntry};

/// One `Name? <email>` group on a mailmap line.
#[derive(Debug, PartialEq)]
struct Person<'a> {
    name: Option<&'a str>,
    email: &'a str,
}

/// Parse mailmap text. Blank lines and `#` lines are skipped; a `#` after the
/// last `>` starts a trailing comment.
pub fn parse_mailmap(text: &str) -> AuthormapResult<Mailmap> {
    let mut map = Mailmap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let people = split_people(strip_trailing_comment(line)).map_err(|message| {
            AuthormapError::Parse {
                line: line_no,
                message,
            }
        })?;

        match people.as_slice() {
            [canonical] => {
                let Some(name) = canonical.name else {
                    tracing::debug!(line = line_no, "skipping mailmap line with bare email");
                    continue;
                };
                map.insert(
                    Mailmap::key(None, canonical.email),
                    MailmapEntry {
                        canonical_name: name.to_string(),
                        canonical_email: canonical.email.to_string(),
                    },
                );
            }
            [canonical, alias] => {
                map.insert(
                    Mailmap::key(alias.name, alias.email),
                    MailmapEntry {
                        canonical_name: canonical.name.unwrap_or("").to_string(),
                        canonical_email: canonical.email.to_string(),
                    },
                );
            }
            _ => {
                return Err(AuthormapError::Parse {
                    line: line_no,
                    message: format!("expected at most two <email> groups, found {}", people.len()),
                })
            }
        }
    }

    tracing::debug!(entries = map.len(), "parsed mailmap");
    Ok(map)
}

fn strip_trailing_comment(line: &str) -> &str {
    match line.rfind('>') {
        Some(end) => match line[end..].find('#') {
            Some(hash) => &line[..end + hash],
            None => line,
        },
        None => line,
    }
}

fn split_people(line: &str) -> Result<Vec<Person<'_>>, String> {
    let mut people = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('<') {
        let close = rest[open..]
            .find('>')
            .map(|c| open + c)
            .ok_or_else(|| "unterminated <email>".to_string())?;

        let name = rest[..open].trim();
        let email = rest[open + 1..close].trim();
        if email.is_empty() {
            return Err("empty <email>".to_string());
        }

        people.push(Person {
            name: (!name.is_empty()).then_some(name),
            email,
        });
        rest = &rest[close + 1..];
    }

    if people.is_empty() {
        return Err("expected <email>".to_string());
    }
    if !rest.trim().is_empty() {
        return Err(format!("unexpected trailing text {:?}", rest.trim()));
    }
    Ok(people)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let map = parse_mailmap("Jane Roe <jane@corp.com> jroe <JROE@home.net>\n").unwrap();
        let entry = map.get("jroe|jroe@home.net").unwrap();
        assert_eq!(entry.canonical_name, "Jane Roe");
        assert_eq!(entry.canonical_email, "jane@corp.com");
    }

    #[test]
    fn alias_without_name_keys_on_email() {
        let map = parse_mailmap("Jane Roe <jane@corp.com> <old@corp.com>").unwrap();
        assert!(map.get("|old@corp.com").is_some());
    }

    #[test]
    fn single_group_maps_email_to_name() {
        let map = parse_mailmap("Jane Roe <jane@corp.com>").unwrap();
        let entry = map.get("|jane@corp.com").unwrap();
        assert_eq!(entry.canonical_name, "Jane Roe");
    }

    #[test]
    fn bare_email_line_is_skipped() {
        let map = parse_mailmap("<jane@corp.com>").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let text = "# header\n\n   \nA <a@x.com> B <b@x.com> # trailing note\n";
        let map = parse_mailmap(text).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get("B|b@x.com").is_some());
    }

    #[test]
    fn canonical_email_only_keeps_empty_name() {
        let map = parse_mailmap("<new@x.com> <old@x.com>").unwrap();
        let entry = map.get("|old@x.com").unwrap();
        assert_eq!(entry.canonical_name, "");
        assert_eq!(entry.canonical_email, "new@x.com");
    }

    #[test]
    fn missing_email_reports_line_number() {
        let err = parse_mailmap("A <a@x.com>\njust a name\n").unwrap_err();
        match err {
            AuthormapError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_bracket_is_error() {
        assert!(parse_mailmap("A <a@x.com").is_err());
    }

    #[test]
    fn three_groups_is_error() {
        assert!(parse_mailmap("A <a@x.com> B <b@x.com> C <c@x.com>").is_err());
    }

    #[test]
    fn empty_text_is_empty_map() {
        assert!(parse_mailmap("").unwrap().is_empty());
    }
}
