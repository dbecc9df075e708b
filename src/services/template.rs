//! Placeholder substitution for announcement templates.
//!
//! Each template kind accepts a fixed set of `{placeholder}` tokens. Rendering
//! replaces every occurrence of a known token and leaves anything else between
//! braces untouched, so a typo in a template is heard rather than silently
//! dropped. [`validate`] lets callers refuse such templates up front.

use std::fmt;

use thiserror::Error;

/// Tokens that may appear in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{court}`
    Court,
    /// `{discipline}`
    Discipline,
    /// `{level}`
    Level,
    /// `{teamA}`
    TeamA,
    /// `{teamB}`
    TeamB,
    /// `{callCount}`
    CallCount,
    /// `{teamNames}`
    TeamNames,
}

impl Placeholder {
    /// Name between the braces.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Court => "court",
            Placeholder::Discipline => "discipline",
            Placeholder::Level => "level",
            Placeholder::TeamA => "teamA",
            Placeholder::TeamB => "teamB",
            Placeholder::CallCount => "callCount",
            Placeholder::TeamNames => "teamNames",
        }
    }
}

/// The three announcements the board can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// A match is sent to a court.
    Assignment,
    /// The match on a court may start.
    Commencing,
    /// A team is summoned again.
    Recall,
}

impl TemplateKind {
    /// Placeholders this kind substitutes.
    pub fn placeholders(self) -> &'static [Placeholder] {
        match self {
            TemplateKind::Assignment => &[
                Placeholder::Court,
                Placeholder::Discipline,
                Placeholder::Level,
                Placeholder::TeamA,
                Placeholder::TeamB,
            ],
            TemplateKind::Commencing => &[Placeholder::Court],
            TemplateKind::Recall => &[
                Placeholder::CallCount,
                Placeholder::Court,
                Placeholder::TeamNames,
            ],
        }
    }

    fn lookup(self, token: &str) -> Option<Placeholder> {
        self.placeholders()
            .iter()
            .copied()
            .find(|placeholder| placeholder.token() == token)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateKind::Assignment => "assignment",
            TemplateKind::Commencing => "commencing",
            TemplateKind::Recall => "recall",
        };
        f.write_str(name)
    }
}

/// A template refers to a token its kind does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} template uses unknown placeholder `{{{token}}}`")]
pub struct UnknownPlaceholder {
    /// Template the token was found in.
    pub kind: TemplateKind,
    /// Token name without braces.
    pub token: String,
}

/// Iterate over the `{...}` tokens of `template` as (start, end, name) spans.
fn tokens(template: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        loop {
            let open = cursor + template[cursor..].find('{')?;
            let close = open + template[open..].find('}')?;
            let name = &template[open + 1..close];
            if name.contains('{') {
                // `{{court}` style input: restart at the inner brace.
                cursor = open + 1;
                continue;
            }
            cursor = close + 1;
            return Some((open, close + 1, name));
        }
    })
}

/// Reject templates that reference placeholders outside `kind`'s set.
pub fn validate(kind: TemplateKind, template: &str) -> Result<(), UnknownPlaceholder> {
    match tokens(template).find(|(_, _, name)| kind.lookup(name).is_none()) {
        Some((_, _, name)) => Err(UnknownPlaceholder {
            kind,
            token: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Substitute every known placeholder of `kind` using `value`.
///
/// `value` is consulted once per occurrence; unknown tokens are copied as is.
pub fn render<F>(kind: TemplateKind, template: &str, mut value: F) -> String
where
    F: FnMut(Placeholder) -> String,
{
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    for (start, end, name) in tokens(template) {
        if let Some(placeholder) = kind.lookup(name) {
            out.push_str(&template[copied..start]);
            out.push_str(&value(placeholder));
            copied = end;
        }
    }
    out.push_str(&template[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment_values(placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Court => "7".into(),
            Placeholder::TeamA => "Alice en Bob".into(),
            Placeholder::TeamB => "Team B".into(),
            Placeholder::Discipline => "Heren Dubbel".into(),
            Placeholder::Level => String::new(),
            other => panic!("unexpected placeholder {other:?}"),
        }
    }

    #[test]
    fn renders_all_known_placeholders() {
        let text = render(
            TemplateKind::Assignment,
            "Court {court}: {teamA} vs {teamB}",
            assignment_values,
        );
        assert_eq!(text, "Court 7: Alice en Bob vs Team B");
    }

    #[test]
    fn replaces_repeated_tokens() {
        let text = render(
            TemplateKind::Commencing,
            "Terrein {court}, ik herhaal, terrein {court}",
            |_| "3".into(),
        );
        assert_eq!(text, "Terrein 3, ik herhaal, terrein 3");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let text = render(
            TemplateKind::Commencing,
            "{callCount} oproep voor terrein {court} {",
            |_| "2".into(),
        );
        assert_eq!(text, "{callCount} oproep voor terrein 2 {");
    }

    #[test]
    fn nested_brace_is_not_swallowed() {
        let text = render(TemplateKind::Commencing, "{{court}}", |_| "4".into());
        assert_eq!(text, "{4}");
    }

    #[test]
    fn validate_reports_first_unknown_token() {
        assert!(validate(TemplateKind::Recall, "{callCount} {court} {teamNames}").is_ok());

        let err = validate(TemplateKind::Commencing, "Terrein {court} voor {teamA}").unwrap_err();
        assert_eq!(err.token, "teamA");
        assert_eq!(
            err.to_string(),
            "commencing template uses unknown placeholder `{teamA}`"
        );
    }
}
