//! Canonical comparison forms for names and emails. Output is for matching
//! only and never shown to users.

/// Noreply suffixes used by GitHub and GitLab.
pub const NOREPLY_SUFFIXES: &[&str] = &["@users.noreply.github.com", "@users.noreply.gitlab.com"];

/// Free-mail providers; anything else counts as a company domain.
pub const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "icloud.com",
    "me.com",
    "aol.com",
    "gmx.com",
    "gmx.de",
    "mail.ru",
    "yandex.ru",
    "qq.com",
    "163.com",
    "proton.me",
    "protonmail.com",
];

/// Placeholder names left behind by unconfigured machines and CI.
pub const GENERIC_NAMES: &[&str] = &[
    "root",
    "admin",
    "administrator",
    "user",
    "test",
    "ubuntu",
    "nobody",
    "unknown",
    "localhost",
    "git",
    "build",
    "jenkins",
];

/// Lowercase, map everything outside `[a-z0-9]` to a space, collapse runs of
/// whitespace and trim.
pub fn normalize_name(name: &str) -> String {
    let replaced: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Part before the first `@`, lowercased. Without an `@` the whole string.
pub fn email_local(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_lowercase()
}

/// Part after the first `@`, lowercased; empty without an `@`.
pub fn email_domain(email: &str) -> String {
    email
        .split_once('@')
        .map(|(_, domain)| domain.to_lowercase())
        .unwrap_or_default()
}

/// Heuristic for automated or provider-generated addresses. Plus-addressed
/// personal mail is a known false positive.
pub fn is_noreply(email: &str) -> bool {
    let lower = email.to_lowercase();
    lower.contains("noreply")
        || lower.contains("no-reply")
        || NOREPLY_SUFFIXES.iter().any(|s| lower.ends_with(s))
        || lower.contains('+')
}

pub fn is_free_mail_domain(domain: &str) -> bool {
    FREE_MAIL_DOMAINS.contains(&domain)
}

/// True when either the normalized name or the email local part is a
/// placeholder such as `root` or `admin`.
pub fn is_generic_identity(name: &str, email: &str) -> bool {
    let name = normalize_name(name);
    let local = email_local(email);
    GENERIC_NAMES.contains(&name.as_str()) || GENERIC_NAMES.contains(&local.as_str())
}

/// Normalized name tokens longer than one character ("J." does not count).
pub fn significant_tokens(name: &str) -> usize {
    normalize_name(name)
        .split(' ')
        .filter(|t| t.len() > 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_strips_punctuation_and_case() {
        assert_eq!(normalize_name("  John   O'Brien-Smith "), "john o brien smith");
        assert_eq!(normalize_name("JOHN.DOE"), "john doe");
        assert_eq!(normalize_name("dev42"), "dev42");
    }

    #[test]
    fn normalize_name_empty_and_symbols() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("!!! ---"), "");
    }

    #[test]
    fn normalize_name_drops_non_ascii_letters() {
        assert_eq!(normalize_name("José Núñez"), "jos n ez");
    }

    #[test]
    fn email_parts() {
        assert_eq!(email_local("John.Doe@Example.COM"), "john.doe");
        assert_eq!(email_domain("John.Doe@Example.COM"), "example.com");
        assert_eq!(email_local("a@b@c"), "a");
        assert_eq!(email_domain("a@b@c"), "b@c");
    }

    #[test]
    fn email_without_at() {
        assert_eq!(email_local("JohnDoe"), "johndoe");
        assert_eq!(email_domain("JohnDoe"), "");
    }

    #[test]
    fn noreply_detection() {
        assert!(is_noreply("noreply@example.com"));
        assert!(is_noreply("No-Reply@example.com"));
        assert!(is_noreply("12345+jdoe@users.noreply.github.com"));
        assert!(is_noreply("jdoe@users.noreply.gitlab.com"));
        assert!(is_noreply("john+lists@gmail.com"));
        assert!(!is_noreply("john@gmail.com"));
    }

    #[test]
    fn generic_identity_detection() {
        assert!(is_generic_identity("root", "root@build-01"));
        assert!(is_generic_identity("Jane", "admin@corp.com"));
        assert!(is_generic_identity("Ubuntu", "jane@corp.com"));
        assert!(!is_generic_identity("Jane Roe", "jane@corp.com"));
    }

    #[test]
    fn free_mail_domains() {
        assert!(is_free_mail_domain("gmail.com"));
        assert!(!is_free_mail_domain("acme.io"));
    }

    #[test]
    fn significant_token_count() {
        assert_eq!(significant_tokens("John Doe"), 2);
        assert_eq!(significant_tokens("John"), 1);
        assert_eq!(significant_tokens("John Q. Public"), 2);
        assert_eq!(significant_tokens(""), 0);
    }
}
