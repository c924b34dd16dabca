//! Emoji-led callout boxes.

/// Callout flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CalloutKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl CalloutKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Border and background colors.
    fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Note => ("#0969da", "#ddf4ff"),
            Self::Tip => ("#1a7f37", "#dafbe1"),
            Self::Important => ("#8250df", "#fbefff"),
            Self::Warning => ("#9a6700", "#fff8c5"),
            Self::Caution => ("#d1242f", "#ffebe9"),
        }
    }
}

/// Leading markers, longest first where one is a prefix of another.
const MARKERS: &[(&str, CalloutKind)] = &[
    ("💡", CalloutKind::Tip),
    ("📝", CalloutKind::Note),
    ("❗", CalloutKind::Important),
    ("⚠\u{fe0f}", CalloutKind::Warning),
    ("⚠", CalloutKind::Warning),
    ("🚨", CalloutKind::Caution),
];

fn parse(line: &str) -> Option<(CalloutKind, &str, &str)> {
    let trimmed = line.trim_start();
    MARKERS.iter().find_map(|(marker, kind)| {
        trimmed
            .strip_prefix(marker)
            .map(|rest| (*kind, *marker, rest.trim()))
    })
}

/// Rewrite callout lines into styled boxes.
pub(super) fn apply(text: &str) -> String {
    text.lines()
        .map(|line| match parse(line) {
            Some((kind, icon, body)) => {
                let name = kind.as_str();
                let (border, background) = kind.colors();
                format!(
                    r#"<div class="callout callout-{name}" data-callout="{name}" style="border-left-color:{border};background-color:{background}"><span class="callout-icon" aria-hidden="true">{icon}</span><div class="callout-body">{body}</div></div>"#
                )
            }
            None => line.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
