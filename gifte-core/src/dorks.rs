//! Search-engine dork templates
//!
//! Pre-built queries for manual follow-up on an email address. Templates use
//! `{email}`, `{local}` and `{domain}` placeholders and are expanded in the
//! order they are listed.

/// Result for an address that does not split on a single `@`
pub const INVALID_EMAIL_DORK: &str = "Invalid email";

/// Dork templates, in output order
pub static DORK_TEMPLATES: &[&str] = &[
    "from:{email}",
    "site:{domain} {local}",
    "\"{local}\" filetype:pdf",
    "\"{email}\"",
    "\"{local}\" site:linkedin.com",
    "intext:\"{email}\" site:pastebin.com",
];

/// Expand every dork template for an email address
pub fn generate_dorks(email: &str) -> Vec<String> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return vec![INVALID_EMAIL_DORK.to_string()];
    };

    DORK_TEMPLATES
        .iter()
        .map(|template| {
            template
                .replace("{email}", email)
                .replace("{local}", local)
                .replace("{domain}", domain)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dorks() {
        let dorks = generate_dorks("jane@example.com");
        assert_eq!(
            dorks,
            vec![
                "from:jane@example.com",
                "site:example.com jane",
                "\"jane\" filetype:pdf",
                "\"jane@example.com\"",
                "\"jane\" site:linkedin.com",
                "intext:\"jane@example.com\" site:pastebin.com",
            ]
        );
    }

    #[test]
    fn test_repeated_calls_match() {
        assert_eq!(generate_dorks("a.b@c.org"), generate_dorks("a.b@c.org"));
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(generate_dorks("no-at-sign"), vec!["Invalid email"]);
        assert_eq!(generate_dorks("a@b@c.com"), vec!["Invalid email"]);
    }
}
